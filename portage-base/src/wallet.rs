use ethers::types::U256;
use portage_configuration::route::{DestinationFeeConf, TransferConfig, TransferSpec};
use portage_configuration::{ConfigError, WalletConfig};
use portage_core::decimal::{convert_decimals, parse_units};
use portage_core::{
    AssetAmount, Balance, BalanceReader, BalanceStream, ContractTransfer, ExtrinsicTransfer,
    FeeEstimator, FeeSchedule, TransferCall,
};
use portage_types::{AssetId, NameOrDomain, WalletAddress};
use std::collections::HashMap;
use std::sync::Arc;

use crate::{metrics::WalletMetrics, ChainChannel, WalletError};

/// Reference weight of one second of execution time. Dynamic fee
/// schedules publish units-per-second, extrinsics are billed in weight.
const WEIGHT_PER_SECOND: u64 = 1_000_000_000_000;

/// Everything the source chain needs to know before dispatching a
/// transfer, quoted in one round
#[derive(Debug, Clone, Copy)]
pub struct SourceData {
    /// Spendable balance of the transferred asset, in destination precision
    pub balance: AssetAmount,
    /// Balance of the route's fee asset on the source chain
    pub fee_balance: AssetAmount,
    /// Execution fee charged on the destination chain
    pub destination_fee: AssetAmount,
    /// Estimated dispatch cost on the source chain, in its native asset
    pub source_fee: AssetAmount,
    /// Existential minimum the destination enforces for the asset
    pub min: AssetAmount,
}

/// A dispatchable call plus the fees quoted against it
#[derive(Debug, Clone)]
pub struct TransferData {
    /// The call, ready for signing
    pub call: TransferCall,
    /// Estimated dispatch cost on the source chain
    pub source_fee: AssetAmount,
    /// Execution fee charged on the destination chain
    pub destination_fee: AssetAmount,
}

/// A wallet session spanning every configured chain.
///
/// Holds one open [`ChainChannel`] per chain and answers balance, fee and
/// transfer questions for the lanes the configuration routes. All state is
/// built up front; operations only read.
#[derive(Debug)]
pub struct Wallet {
    /// Wallet config
    pub config: WalletConfig,
    /// Open channels, keyed by chain name
    pub channels: HashMap<String, ChainChannel>,
    /// Prometheus metrics
    pub metrics: Arc<WalletMetrics>,
}

impl Wallet {
    /// Instantiate from pre-built channels
    pub fn new(
        config: WalletConfig,
        channels: HashMap<String, ChainChannel>,
        metrics: Arc<WalletMetrics>,
    ) -> Self {
        Self {
            config,
            channels,
            metrics,
        }
    }

    /// The open channel for a chain
    pub fn channel(&self, chain: &str) -> Result<&ChainChannel, WalletError> {
        self.channels
            .get(chain)
            .ok_or_else(|| WalletError::MissingChannel(chain.to_owned()))
    }

    /// Resolve a lane into its full transfer configuration
    pub fn resolve_route(
        &self,
        source: NameOrDomain,
        destination: NameOrDomain,
        asset: &str,
    ) -> Result<TransferConfig, WalletError> {
        Ok(self.config.resolve_route(source, destination, asset)?)
    }

    /// Read the balance of the transferred asset for `address` on the
    /// source chain, normalized to the destination registration's
    /// precision
    #[tracing::instrument(err, skip(self, transfer), fields(asset = %transfer.asset, chain = %transfer.source.name))]
    pub async fn balance(
        &self,
        address: WalletAddress,
        transfer: &TransferConfig,
    ) -> Result<AssetAmount, WalletError> {
        let reader = self
            .channel(&transfer.source.name)?
            .reader(address, &transfer.asset)?;
        let raw = reader.current_balance().await?;
        self.metrics
            .balance_observed(&transfer.source.name, &transfer.asset, raw.0);
        self.normalized(raw, transfer)
    }

    /// Read the balance of the route's fee asset for `address` on the
    /// source chain. Routes without a fee asset quote zero in the
    /// transferred asset
    #[tracing::instrument(err, skip(self, transfer), fields(asset = %transfer.asset, chain = %transfer.source.name))]
    pub async fn fee_balance(
        &self,
        address: WalletAddress,
        transfer: &TransferConfig,
    ) -> Result<AssetAmount, WalletError> {
        let fee = match &transfer.fee_asset {
            Some(fee) => fee,
            None => return Ok(AssetAmount::zero(transfer.source_asset.decimals)),
        };
        // Fee assets settle through chain storage
        if fee.source.is_erc20() {
            return Err(WalletError::EvmFeeAsset {
                asset: fee.name.clone(),
                chain: transfer.source.name.clone(),
            });
        }
        let reader = self
            .channel(&transfer.source.name)?
            .reader(address, &fee.name)?;
        let raw = reader.current_balance().await?;
        self.metrics
            .balance_observed(&transfer.source.name, &fee.name, raw.0);
        Ok(AssetAmount::new(raw.0, fee.source.decimals))
    }

    /// Quote the execution fee the destination chain charges for this
    /// lane. Fixed fees come straight from configuration; dynamic fees
    /// are read from the destination's schedule at call time, never
    /// cached
    #[tracing::instrument(err, skip(self, transfer), fields(asset = %transfer.asset, chain = %transfer.destination.name))]
    pub async fn destination_fee(
        &self,
        transfer: &TransferConfig,
    ) -> Result<AssetAmount, WalletError> {
        let (fee_name, fee_asset) = match &transfer.fee_asset {
            Some(fee) => (fee.name.as_str(), &fee.destination),
            None => (transfer.asset.as_str(), &transfer.destination_asset),
        };
        match &transfer.destination_fee {
            DestinationFeeConf::Fixed { amount } => {
                let fee = parse_units(amount, fee_asset.decimals.into())?;
                Ok(AssetAmount::new(fee, fee_asset.decimals))
            }
            DestinationFeeConf::Dynamic {
                pallet,
                entry,
                weight,
            } => {
                let schedule = self
                    .channel(&transfer.destination.name)?
                    .schedule(pallet, entry)?;
                let units = schedule.units_per_second(&fee_asset.id).await?.ok_or_else(
                    || WalletError::UnpricedAsset {
                        asset: fee_name.to_owned(),
                        chain: transfer.destination.name.clone(),
                    },
                )?;
                let fee = units.0.saturating_mul(U256::from(*weight))
                    / U256::from(WEIGHT_PER_SECOND);
                Ok(AssetAmount::new(fee, fee_asset.decimals))
            }
        }
    }

    /// The existential minimum the destination chain enforces for the
    /// transferred asset. Chains without a configured floor quote zero
    #[tracing::instrument(err, skip(self, transfer), fields(asset = %transfer.asset, chain = %transfer.destination.name))]
    pub async fn destination_min(
        &self,
        transfer: &TransferConfig,
    ) -> Result<AssetAmount, WalletError> {
        let reader = self
            .channel(&transfer.destination.name)?
            .asset_reader(&transfer.asset)?;
        let min = reader
            .minimum_balance()
            .await?
            .map(|raw| AssetAmount::new(raw.0, transfer.destination_asset.decimals))
            .unwrap_or_else(|| AssetAmount::zero(transfer.destination_asset.decimals));
        Ok(min)
    }

    /// Estimate the cost of dispatching a transfer of `amount` on the
    /// source chain, quoted in its native asset. The call is assembled
    /// exactly as it would be dispatched and handed to the chain's
    /// estimator
    #[tracing::instrument(err, skip(self, destination_fee, transfer), fields(asset = %transfer.asset))]
    pub async fn source_fee(
        &self,
        amount: U256,
        source_address: WalletAddress,
        destination_address: WalletAddress,
        destination_fee: &AssetAmount,
        transfer: &TransferConfig,
    ) -> Result<AssetAmount, WalletError> {
        self.channel(&transfer.source.name)?
            .known_account(source_address)?;
        let call = self.build_transfer(amount, destination_address, destination_fee, transfer)?;
        self.estimate_source_fee(&call, transfer).await
    }

    /// Assemble the dispatchable call for this lane. The route's builder
    /// section fixes the mechanism; no chain state is read
    pub fn build_transfer(
        &self,
        amount: U256,
        destination_address: WalletAddress,
        destination_fee: &AssetAmount,
        transfer: &TransferConfig,
    ) -> Result<TransferCall, WalletError> {
        let call = match &transfer.spec {
            TransferSpec::Contract(conf) => TransferCall::Contract(ContractTransfer {
                origin_domain: transfer.source.domain,
                destination_domain: transfer.destination.domain,
                router: conf.router.as_evm_address()?,
                token: match transfer.source_asset.id {
                    AssetId::Contract(address) => address.as_evm_address()?,
                    _ => {
                        return Err(WalletError::NoContractId {
                            asset: transfer.asset.clone(),
                            chain: transfer.source.name.clone(),
                        })
                    }
                },
                amount,
                fee: destination_fee.amount,
                recipient: destination_address,
            }),
            TransferSpec::Extrinsic(conf) => TransferCall::Extrinsic(ExtrinsicTransfer {
                origin_domain: transfer.source.domain,
                destination_domain: transfer.destination.domain,
                pallet: conf.pallet.clone(),
                pallet_instance: conf.pallet_instance,
                asset_id: transfer.source_asset.id,
                amount,
                fee_asset_id: transfer.fee_asset.as_ref().map(|fee| fee.source.id),
                fee: destination_fee.amount,
                recipient: destination_address,
            }),
        };
        self.metrics.transfer_assembled(
            &transfer.source.name,
            &transfer.destination.name,
            call.mechanism(),
        );
        Ok(call)
    }

    /// Subscribe to balance updates for every asset registered on a
    /// chain, merged into one stream. Dropping the stream cancels the
    /// underlying subscriptions
    #[tracing::instrument(err, skip(self))]
    pub async fn subscribe_balance(
        &self,
        address: WalletAddress,
        chain: NameOrDomain,
    ) -> Result<BalanceStream, WalletError> {
        let name = self
            .config
            .resolve_domain(chain.clone())
            .ok_or_else(|| ConfigError::UnknownChain(chain.to_string()))?;
        let channel = self.channel(&name)?;
        channel.known_account(address)?;
        channel.subscribe().await
    }

    /// Quote everything the source chain needs before dispatch: spendable
    /// balance, fee-asset balance, both fees and the destination's
    /// minimum. The source fee is estimated against the current balance
    /// as the prospective amount
    #[tracing::instrument(err, skip(self))]
    pub async fn source_data(
        &self,
        source_address: WalletAddress,
        source_chain: NameOrDomain,
        destination_address: WalletAddress,
        destination_chain: NameOrDomain,
        asset: &str,
    ) -> Result<SourceData, WalletError> {
        let transfer = self.resolve_route(source_chain, destination_chain, asset)?;
        let reader = self
            .channel(&transfer.source.name)?
            .reader(source_address, &transfer.asset)?;
        let (raw, fee_balance, destination_fee, min) = tokio::try_join!(
            async { Ok::<_, WalletError>(reader.current_balance().await?) },
            self.fee_balance(source_address, &transfer),
            self.destination_fee(&transfer),
            self.destination_min(&transfer),
        )?;
        self.metrics
            .balance_observed(&transfer.source.name, &transfer.asset, raw.0);
        let balance = self.normalized(raw, &transfer)?;
        // Estimated against the full balance; priced after the fee quote
        // so the call carries it
        let source_fee = self
            .source_fee(
                raw.0,
                source_address,
                destination_address,
                &destination_fee,
                &transfer,
            )
            .await?;
        Ok(SourceData {
            balance,
            fee_balance,
            destination_fee,
            source_fee,
            min,
        })
    }

    /// Assemble a transfer of `amount` and quote both fees against it
    #[tracing::instrument(err, skip(self))]
    pub async fn transfer_data(
        &self,
        source_address: WalletAddress,
        source_chain: NameOrDomain,
        destination_address: WalletAddress,
        destination_chain: NameOrDomain,
        asset: &str,
        amount: U256,
    ) -> Result<TransferData, WalletError> {
        let transfer = self.resolve_route(source_chain, destination_chain, asset)?;
        self.channel(&transfer.source.name)?
            .known_account(source_address)?;
        let destination_fee = self.destination_fee(&transfer).await?;
        let call = self.build_transfer(amount, destination_address, &destination_fee, &transfer)?;
        let source_fee = self.estimate_source_fee(&call, &transfer).await?;
        Ok(TransferData {
            call,
            source_fee,
            destination_fee,
        })
    }

    async fn estimate_source_fee(
        &self,
        call: &TransferCall,
        transfer: &TransferConfig,
    ) -> Result<AssetAmount, WalletError> {
        let estimator = self.channel(&transfer.source.name)?.estimator(call)?;
        let raw = estimator.estimate_fee(call).await?;
        let amount = match call {
            // Gas estimates are quoted in 18-decimal wei
            TransferCall::Contract(_) => {
                convert_decimals(raw.0, 18, transfer.source.specs.native_decimals.into())?
            }
            // payment_queryInfo already quotes in native precision
            TransferCall::Extrinsic(_) => raw.0,
        };
        Ok(AssetAmount::new(
            amount,
            transfer.source.specs.native_decimals,
        ))
    }

    fn normalized(
        &self,
        raw: Balance,
        transfer: &TransferConfig,
    ) -> Result<AssetAmount, WalletError> {
        let amount = convert_decimals(
            raw.0,
            transfer.source_asset.decimals.into(),
            transfer.destination_asset.decimals.into(),
        )?;
        Ok(AssetAmount::new(
            amount,
            transfer.destination_asset.decimals,
        ))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use futures_util::{stream, StreamExt};
    use portage_configuration::get_builtin;
    use portage_configuration::route::FeeAssetConfig;
    use portage_test::mocks::{MockBalanceReader, MockError, MockFeeEstimator, MockFeeSchedule};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn alice() -> WalletAddress {
        WalletAddress::from([7u8; 32])
    }

    fn test_wallet() -> Wallet {
        let config = get_builtin("test").expect("!builtin").clone();
        let metrics = Arc::new(
            WalletMetrics::new(
                "test",
                None,
                Arc::new(prometheus::Registry::new()),
            )
            .expect("could not make metrics"),
        );
        Wallet::new(config, Default::default(), metrics)
    }

    fn channel(wallet: &Wallet, chain: &str) -> ChainChannel {
        let domain = wallet
            .config
            .protocol()
            .get_network(chain.into())
            .expect("!network")
            .domain;
        ChainChannel::new(chain, domain, alice())
    }

    fn reader_returning(raw: u64) -> MockBalanceReader {
        let mut reader = MockBalanceReader::new();
        reader
            .expect__current_balance()
            .returning(move || Ok(Balance(U256::from(raw))));
        reader
    }

    #[tokio::test]
    async fn it_normalizes_balances_to_destination_precision() {
        let mut wallet = test_wallet();
        let mut riverton = channel(&wallet, "riverton");
        riverton
            .readers
            .insert("RVT".to_owned(), reader_returning(5_000_000_000_000).into());
        wallet.channels.insert("riverton".to_owned(), riverton);

        let mut transfer = wallet
            .resolve_route("riverton".into(), "emberhart".into(), "RVT")
            .unwrap();

        // equal precision on both ends passes through
        let balance = wallet.balance(alice(), &transfer).await.unwrap();
        assert_eq!(
            balance,
            AssetAmount::new(U256::from(5_000_000_000_000u64), 12)
        );

        // coarser destination registration truncates
        transfer.destination_asset.decimals = 6;
        let balance = wallet.balance(alice(), &transfer).await.unwrap();
        assert_eq!(balance, AssetAmount::new(U256::from(5_000_000u64), 6));
    }

    #[tokio::test]
    async fn it_quotes_zero_fee_balance_without_a_fee_asset() {
        let wallet = test_wallet();
        // the emberhart -> riverton lane names no fee asset
        let transfer = wallet
            .resolve_route("emberhart".into(), "riverton".into(), "USDL")
            .unwrap();

        let fee_balance = wallet.fee_balance(alice(), &transfer).await.unwrap();
        assert!(fee_balance.is_zero());
        assert_eq!(fee_balance.decimals, transfer.source_asset.decimals);
        assert_eq!(fee_balance.decimals, 6);
    }

    #[tokio::test]
    async fn it_reads_fee_balances_through_chain_storage() {
        let mut wallet = test_wallet();
        let mut riverton = channel(&wallet, "riverton");
        riverton
            .readers
            .insert("RVT".to_owned(), reader_returning(800_000_000_000).into());
        wallet.channels.insert("riverton".to_owned(), riverton);

        // riverton -> emberhart pays its destination fee in RVT
        let transfer = wallet
            .resolve_route("riverton".into(), "emberhart".into(), "RVT")
            .unwrap();
        let fee_balance = wallet.fee_balance(alice(), &transfer).await.unwrap();
        assert_eq!(
            fee_balance,
            AssetAmount::new(U256::from(800_000_000_000u64), 12)
        );
    }

    #[tokio::test]
    async fn it_rejects_erc20_fee_assets() {
        let wallet = test_wallet();
        let mut transfer = wallet
            .resolve_route("riverton".into(), "emberhart".into(), "RVT")
            .unwrap();

        let erc20 = wallet
            .config
            .registration("emberhart", "USDL")
            .unwrap()
            .clone();
        transfer.fee_asset = Some(FeeAssetConfig {
            name: "USDL".to_owned(),
            source: erc20.clone(),
            destination: erc20,
        });

        let err = wallet.fee_balance(alice(), &transfer).await.unwrap_err();
        assert!(matches!(err, WalletError::EvmFeeAsset { .. }));
    }

    #[tokio::test]
    async fn it_parses_fixed_destination_fees() {
        let wallet = test_wallet();

        // quoted in the fee asset's destination registration (RVT, 12)
        let transfer = wallet
            .resolve_route("riverton".into(), "lakewood".into(), "RVT")
            .unwrap();
        let fee = wallet.destination_fee(&transfer).await.unwrap();
        assert_eq!(fee, AssetAmount::new(U256::from(19_900_000_000u64), 12));

        // no fee asset: quoted in the transferred asset itself (USDL, 6)
        let transfer = wallet
            .resolve_route("emberhart".into(), "riverton".into(), "USDL")
            .unwrap();
        let fee = wallet.destination_fee(&transfer).await.unwrap();
        assert_eq!(fee, AssetAmount::new(U256::from(150_000u64), 6));
    }

    #[tokio::test]
    async fn it_reads_dynamic_destination_fees_live() {
        let mut wallet = test_wallet();

        let mut schedule = MockFeeSchedule::new();
        schedule
            .expect__units_per_second()
            .withf(|asset| asset == &AssetId::Local(5))
            .returning(|_| Ok(Some(Balance(U256::from(10_000_000_000_000u64)))));

        let mut emberhart = channel(&wallet, "emberhart");
        emberhart.schedules.insert(
            ("AssetFees".to_owned(), "AssetUnitsPerSecond".to_owned()),
            schedule.into(),
        );
        wallet.channels.insert("emberhart".to_owned(), emberhart);

        let transfer = wallet
            .resolve_route("riverton".into(), "emberhart".into(), "RVT")
            .unwrap();
        let fee = wallet.destination_fee(&transfer).await.unwrap();

        // units * weight / weight-per-second, in destination precision
        assert_eq!(fee, AssetAmount::new(U256::from(40_000_000_000u64), 12));
    }

    #[tokio::test]
    async fn it_errors_on_unpriced_assets() {
        let mut wallet = test_wallet();

        let mut schedule = MockFeeSchedule::new();
        schedule
            .expect__units_per_second()
            .returning(|_| Ok(None));

        let mut emberhart = channel(&wallet, "emberhart");
        emberhart.schedules.insert(
            ("AssetFees".to_owned(), "AssetUnitsPerSecond".to_owned()),
            schedule.into(),
        );
        wallet.channels.insert("emberhart".to_owned(), emberhart);

        let transfer = wallet
            .resolve_route("riverton".into(), "emberhart".into(), "RVT")
            .unwrap();
        let err = wallet.destination_fee(&transfer).await.unwrap_err();
        assert!(matches!(
            err,
            WalletError::UnpricedAsset { ref asset, ref chain }
                if asset == "RVT" && chain == "emberhart"
        ));
    }

    #[tokio::test]
    async fn it_requires_a_schedule_for_dynamic_fees() {
        let mut wallet = test_wallet();
        let transfer = wallet
            .resolve_route("riverton".into(), "emberhart".into(), "RVT")
            .unwrap();

        // no destination channel at all
        let err = wallet.destination_fee(&transfer).await.unwrap_err();
        assert!(matches!(err, WalletError::MissingChannel(_)));

        // channel without the schedule entry
        let emberhart = channel(&wallet, "emberhart");
        wallet.channels.insert("emberhart".to_owned(), emberhart);
        let err = wallet.destination_fee(&transfer).await.unwrap_err();
        assert!(matches!(err, WalletError::MissingSchedule { .. }));
    }

    #[test]
    fn it_builds_extrinsic_transfers() {
        let wallet = test_wallet();
        let transfer = wallet
            .resolve_route("lakewood".into(), "riverton".into(), "RVT")
            .unwrap();

        let fee = AssetAmount::new(U256::from(20_000_000_000u64), 12);
        let call = wallet
            .build_transfer(U256::from(1_000_000_000_000u64), alice(), &fee, &transfer)
            .unwrap();

        match call {
            TransferCall::Extrinsic(call) => {
                assert_eq!(call.origin_domain, 2001);
                assert_eq!(call.destination_domain, 2000);
                assert_eq!(call.pallet, "XTokens");
                assert_eq!(call.pallet_instance, Some(1));
                assert_eq!(call.asset_id, AssetId::Native);
                assert_eq!(call.fee_asset_id, Some(AssetId::Native));
                assert_eq!(call.amount, U256::from(1_000_000_000_000u64));
                assert_eq!(call.fee, U256::from(20_000_000_000u64));
                assert_eq!(call.recipient, alice());
            }
            call => panic!("unexpected mechanism: {}", call),
        }
    }

    #[test]
    fn it_builds_contract_transfers() {
        let wallet = test_wallet();
        let transfer = wallet
            .resolve_route("emberhart".into(), "riverton".into(), "USDL")
            .unwrap();

        let fee = AssetAmount::new(U256::from(150_000u64), 6);
        let call = wallet
            .build_transfer(U256::from(25_000_000u64), alice(), &fee, &transfer)
            .unwrap();

        match call {
            TransferCall::Contract(call) => {
                assert_eq!(call.origin_domain, 2004);
                assert_eq!(call.destination_domain, 2000);
                assert_eq!(
                    call.router,
                    "0x0000000000000000000000000000000000000804"
                        .parse()
                        .unwrap()
                );
                assert_eq!(
                    call.token,
                    "0xffffffff1fcacbd218edc0eba20fc2308c778080"
                        .parse()
                        .unwrap()
                );
                assert_eq!(call.amount, U256::from(25_000_000u64));
                assert_eq!(call.fee, U256::from(150_000u64));
                assert_eq!(call.recipient, alice());
            }
            call => panic!("unexpected mechanism: {}", call),
        }
    }

    #[test]
    fn it_requires_contract_ids_for_router_dispatch() {
        let wallet = test_wallet();
        let mut transfer = wallet
            .resolve_route("emberhart".into(), "riverton".into(), "USDL")
            .unwrap();
        transfer.source_asset.id = AssetId::Local(7);

        let fee = AssetAmount::zero(6);
        let err = wallet
            .build_transfer(U256::from(25_000_000u64), alice(), &fee, &transfer)
            .unwrap_err();
        assert!(matches!(err, WalletError::NoContractId { .. }));
    }

    #[tokio::test]
    async fn it_scales_contract_fee_estimates_to_native_decimals() {
        let mut wallet = test_wallet();

        let mut estimator = MockFeeEstimator::new();
        estimator
            .expect__estimate_fee()
            .withf(|call| call.amount() == U256::from(25_000_000u64))
            .returning(|_| Ok(Balance(U256::from(21_000_000_000_000u64))));

        let mut emberhart = channel(&wallet, "emberhart");
        emberhart.contract_fees = Some(estimator.into());
        wallet.channels.insert("emberhart".to_owned(), emberhart);

        let mut transfer = wallet
            .resolve_route("emberhart".into(), "riverton".into(), "USDL")
            .unwrap();
        // wei estimates scale down to the chain's native precision
        transfer.source.specs.native_decimals = 12;

        let fee = wallet
            .source_fee(
                U256::from(25_000_000u64),
                alice(),
                alice(),
                &AssetAmount::new(U256::from(150_000u64), 6),
                &transfer,
            )
            .await
            .unwrap();

        assert_eq!(fee, AssetAmount::new(U256::from(21_000_000u64), 12));
    }

    #[tokio::test]
    async fn it_passes_extrinsic_estimates_through() {
        let mut wallet = test_wallet();

        let mut estimator = MockFeeEstimator::new();
        estimator
            .expect__estimate_fee()
            .returning(|_| Ok(Balance(U256::from(160_000_000u64))));

        let mut riverton = channel(&wallet, "riverton");
        riverton.extrinsic_fees = Some(estimator.into());
        wallet.channels.insert("riverton".to_owned(), riverton);

        let transfer = wallet
            .resolve_route("riverton".into(), "lakewood".into(), "RVT")
            .unwrap();
        let fee = wallet
            .source_fee(
                U256::from(5_000_000_000_000u64),
                alice(),
                alice(),
                &AssetAmount::new(U256::from(19_900_000_000u64), 12),
                &transfer,
            )
            .await
            .unwrap();

        assert_eq!(fee, AssetAmount::new(U256::from(160_000_000u64), 12));
    }

    #[tokio::test]
    async fn it_requires_an_estimator_for_the_mechanism() {
        let mut wallet = test_wallet();
        let riverton = channel(&wallet, "riverton");
        wallet.channels.insert("riverton".to_owned(), riverton);

        let transfer = wallet
            .resolve_route("riverton".into(), "lakewood".into(), "RVT")
            .unwrap();
        let err = wallet
            .source_fee(
                U256::one(),
                alice(),
                alice(),
                &AssetAmount::zero(12),
                &transfer,
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            WalletError::MissingEstimator { ref mechanism, .. } if *mechanism == "extrinsic"
        ));
    }

    #[tokio::test]
    async fn it_rejects_unknown_accounts_and_assets() {
        let mut wallet = test_wallet();
        let mut riverton = channel(&wallet, "riverton");
        riverton
            .readers
            .insert("RVT".to_owned(), reader_returning(1).into());
        wallet.channels.insert("riverton".to_owned(), riverton);

        let transfer = wallet
            .resolve_route("riverton".into(), "emberhart".into(), "RVT")
            .unwrap();

        // not the account the channel was built for
        let err = wallet
            .balance(WalletAddress::from([9u8; 32]), &transfer)
            .await
            .unwrap_err();
        assert!(matches!(err, WalletError::UnknownAccount { .. }));

        // no reader registered for the asset
        let mut transfer = transfer;
        transfer.asset = "USDL".to_owned();
        let err = wallet.balance(alice(), &transfer).await.unwrap_err();
        assert!(matches!(err, WalletError::AssetNotFound { .. }));

        // no channel open for the chain
        wallet.channels.clear();
        let err = wallet.balance(alice(), &transfer).await.unwrap_err();
        assert!(matches!(err, WalletError::MissingChannel(_)));
    }

    #[tokio::test]
    async fn it_surfaces_chain_read_failures() {
        let mut wallet = test_wallet();

        let mut reader = MockBalanceReader::new();
        reader
            .expect__current_balance()
            .returning(|| Err(MockError("no peer".to_owned()).into()));

        let mut riverton = channel(&wallet, "riverton");
        riverton.readers.insert("RVT".to_owned(), reader.into());
        wallet.channels.insert("riverton".to_owned(), riverton);

        let transfer = wallet
            .resolve_route("riverton".into(), "emberhart".into(), "RVT")
            .unwrap();
        let err = wallet.balance(alice(), &transfer).await.unwrap_err();
        assert!(matches!(err, WalletError::QueryError(_)));

        let err: WalletError = MockError("no peer".to_owned()).into();
        assert!(matches!(err, WalletError::MockError(_)));
    }

    #[tokio::test]
    async fn it_quotes_destination_minimums() {
        let mut wallet = test_wallet();

        let mut with_floor = MockBalanceReader::new();
        with_floor
            .expect__minimum_balance()
            .returning(|| Ok(Some(Balance(U256::from(100_000_000u64)))));
        let mut without_floor = MockBalanceReader::new();
        without_floor
            .expect__minimum_balance()
            .returning(|| Ok(None));

        let mut emberhart = channel(&wallet, "emberhart");
        emberhart
            .readers
            .insert("RVT".to_owned(), with_floor.into());
        emberhart
            .readers
            .insert("USDL".to_owned(), without_floor.into());
        wallet.channels.insert("emberhart".to_owned(), emberhart);

        let transfer = wallet
            .resolve_route("riverton".into(), "emberhart".into(), "RVT")
            .unwrap();
        let min = wallet.destination_min(&transfer).await.unwrap();
        assert_eq!(min, AssetAmount::new(U256::from(100_000_000u64), 12));

        // assets without a configured floor quote zero
        let mut transfer = transfer;
        transfer.asset = "USDL".to_owned();
        transfer.destination_asset = wallet
            .config
            .registration("emberhart", "USDL")
            .unwrap()
            .clone();
        let min = wallet.destination_min(&transfer).await.unwrap();
        assert_eq!(min, AssetAmount::zero(6));
    }

    #[tokio::test]
    async fn it_merges_subscriptions_and_cancels_constituents() {
        let mut wallet = test_wallet();
        let emitted = Arc::new(AtomicUsize::new(0));

        let mut emberhart = channel(&wallet, "emberhart");
        for asset in ["RVT", "USDL", "EMBR"] {
            let emitted = emitted.clone();
            let mut reader = MockBalanceReader::new();
            reader.expect__subscribe().return_once(move || {
                Ok(stream::unfold(emitted, |emitted| async move {
                    emitted.fetch_add(1, Ordering::SeqCst);
                    Some((Ok(Balance(U256::one())), emitted))
                })
                .boxed())
            });
            emberhart.readers.insert(asset.to_owned(), reader.into());
        }
        wallet.channels.insert("emberhart".to_owned(), emberhart);

        let err = wallet
            .subscribe_balance(alice(), "gotham".into())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            WalletError::ConfigError(ConfigError::UnknownChain(_))
        ));
        let err = wallet
            .subscribe_balance(WalletAddress::from([9u8; 32]), "emberhart".into())
            .await
            .unwrap_err();
        assert!(matches!(err, WalletError::UnknownAccount { .. }));

        let mut stream = wallet
            .subscribe_balance(alice(), "emberhart".into())
            .await
            .unwrap();
        for _ in 0..6 {
            assert!(stream.next().await.unwrap().is_ok());
        }

        let seen = emitted.load(Ordering::SeqCst);
        assert!(seen >= 6);
        drop(stream);

        // nothing polls the constituents once the merged stream is gone
        assert_eq!(emitted.load(Ordering::SeqCst), seen);
    }

    #[tokio::test]
    async fn it_assembles_source_data() {
        let mut wallet = test_wallet();

        let mut estimator = MockFeeEstimator::new();
        estimator
            .expect__estimate_fee()
            .withf(|call| {
                // estimated against the current balance, fee quote aboard
                call.amount() == U256::from(5_000_000_000_000u64)
                    && matches!(
                        call,
                        TransferCall::Extrinsic(call)
                            if call.fee == U256::from(19_900_000_000u64)
                    )
            })
            .returning(|_| Ok(Balance(U256::from(160_000_000u64))));

        let mut riverton = channel(&wallet, "riverton");
        riverton
            .readers
            .insert("RVT".to_owned(), reader_returning(5_000_000_000_000).into());
        riverton.extrinsic_fees = Some(estimator.into());
        wallet.channels.insert("riverton".to_owned(), riverton);

        let mut floor = MockBalanceReader::new();
        floor
            .expect__minimum_balance()
            .returning(|| Ok(Some(Balance(U256::from(33_333_333u64)))));
        let mut lakewood = channel(&wallet, "lakewood");
        lakewood.readers.insert("RVT".to_owned(), floor.into());
        wallet.channels.insert("lakewood".to_owned(), lakewood);

        let data = wallet
            .source_data(alice(), "riverton".into(), alice(), "lakewood".into(), "RVT")
            .await
            .unwrap();

        assert_eq!(
            data.balance,
            AssetAmount::new(U256::from(5_000_000_000_000u64), 12)
        );
        assert_eq!(
            data.fee_balance,
            AssetAmount::new(U256::from(5_000_000_000_000u64), 12)
        );
        assert_eq!(
            data.destination_fee,
            AssetAmount::new(U256::from(19_900_000_000u64), 12)
        );
        assert_eq!(
            data.source_fee,
            AssetAmount::new(U256::from(160_000_000u64), 12)
        );
        assert_eq!(data.min, AssetAmount::new(U256::from(33_333_333u64), 12));
    }

    #[tokio::test]
    async fn it_quotes_transfer_data() {
        let mut wallet = test_wallet();

        let mut estimator = MockFeeEstimator::new();
        estimator
            .expect__estimate_fee()
            .returning(|_| Ok(Balance(U256::from(200_000_000u64))));
        let mut riverton = channel(&wallet, "riverton");
        riverton.extrinsic_fees = Some(estimator.into());
        wallet.channels.insert("riverton".to_owned(), riverton);

        let mut schedule = MockFeeSchedule::new();
        schedule
            .expect__units_per_second()
            .returning(|_| Ok(Some(Balance(U256::from(10_000_000_000_000u64)))));
        let mut emberhart = channel(&wallet, "emberhart");
        emberhart.schedules.insert(
            ("AssetFees".to_owned(), "AssetUnitsPerSecond".to_owned()),
            schedule.into(),
        );
        wallet.channels.insert("emberhart".to_owned(), emberhart);

        let data = wallet
            .transfer_data(
                alice(),
                "riverton".into(),
                alice(),
                "emberhart".into(),
                "RVT",
                U256::from(2_000_000_000_000u64),
            )
            .await
            .unwrap();

        assert_eq!(
            data.destination_fee,
            AssetAmount::new(U256::from(40_000_000_000u64), 12)
        );
        assert_eq!(
            data.source_fee,
            AssetAmount::new(U256::from(200_000_000u64), 12)
        );
        match data.call {
            TransferCall::Extrinsic(call) => {
                assert_eq!(call.pallet, "XTokens");
                assert_eq!(call.pallet_instance, None);
                assert_eq!(call.amount, U256::from(2_000_000_000_000u64));
                assert_eq!(call.fee, U256::from(40_000_000_000u64));
                assert_eq!(call.fee_asset_id, Some(AssetId::Native));
            }
            call => panic!("unexpected mechanism: {}", call),
        }

        let report = String::from_utf8(wallet.metrics.gather().unwrap()).unwrap();
        assert!(report.contains("transfers_assembled_total"));
    }
}
