use std::sync::Arc;

use async_trait::async_trait;
use portage_core::{Balance, FeeEstimator, FeeSchedule, QueryError, TransferCall};
use portage_types::AssetId;
use subxt::ext::scale_value::serde::from_value;
use subxt::ext::sp_core::sr25519;
use subxt::ext::sp_runtime::traits::{IdentifyAccount, Verify};
use subxt::rpc::rpc_params;
use subxt::tx::ExtrinsicParams;
use subxt::Config;

use crate::decodings::PaymentInfo;
use crate::queries::asset_read;
use crate::transfer::extrinsic_payload;
use crate::{PortageOnlineClient, SubstrateError, SubstrateSigner};

/// Chain-native fee estimator backed by `payment_queryInfo`
#[derive(Clone)]
pub struct SubstrateFeeEstimator<T: Config> {
    api: PortageOnlineClient<T>,
    signer: Arc<SubstrateSigner<T>>,
    name: String,
}

impl<T> SubstrateFeeEstimator<T>
where
    T: Config,
{
    /// Instantiate a new SubstrateFeeEstimator object
    pub fn new(api: PortageOnlineClient<T>, signer: Arc<SubstrateSigner<T>>, name: &str) -> Self {
        Self {
            api,
            signer,
            name: name.to_owned(),
        }
    }
}

impl<T> std::fmt::Debug for SubstrateFeeEstimator<T>
where
    T: Config,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SubstrateFeeEstimator {{ chain: {} }}", self.name)
    }
}

impl<T> std::fmt::Display for SubstrateFeeEstimator<T>
where
    T: Config,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SubstrateFeeEstimator {{ chain: {} }}", self.name)
    }
}

#[async_trait]
impl<T> FeeEstimator for SubstrateFeeEstimator<T>
where
    T: Config + Send + Sync,
    <<T as Config>::ExtrinsicParams as ExtrinsicParams<
        <T as Config>::Index,
        <T as Config>::Hash,
    >>::OtherParams: std::default::Default + Send + Sync,
    <T as Config>::Index: std::default::Default,
    <T as Config>::AccountId: Into<<T as Config>::Address> + Clone + Send + Sync + 'static,
    <T as Config>::Signature: From<sr25519::Signature>,
    <<T as Config>::Signature as Verify>::Signer:
        From<sr25519::Public> + IdentifyAccount<AccountId = <T as Config>::AccountId>,
{
    fn name(&self) -> &str {
        &self.name
    }

    #[tracing::instrument(err, skip(self))]
    async fn estimate_fee(&self, call: &TransferCall) -> Result<Balance, QueryError> {
        let transfer = match call {
            TransferCall::Extrinsic(transfer) => transfer,
            _ => return Err(QueryError::UnsupportedCall(call.mechanism())),
        };

        // The dispatch is assembled and signed first so the node prices
        // the real call. Nonce zero is fine, queryInfo weighs length and
        // dispatch class rather than signature validity.
        let tx = extrinsic_payload(transfer)?;
        let signed = self
            .api
            .tx()
            .create_signed_with_nonce(
                &tx,
                self.signer.as_ref(),
                Default::default(),
                Default::default(),
            )
            .map_err(SubstrateError::from)?;

        let params = rpc_params![format!("0x{}", hex::encode(signed.encoded()))];
        let response: serde_json::Value = self
            .api
            .rpc()
            .request("payment_queryInfo", params)
            .await
            .map_err(SubstrateError::from)?;
        let info: PaymentInfo = serde_json::from_value(response)
            .map_err(|e| QueryError::DecodeError(e.to_string()))?;

        Ok(Balance(info.partial_fee.into()))
    }
}

/// Per-asset execution pricing read from one chain storage entry
#[derive(Clone)]
pub struct SubstrateFeeSchedule<T: Config> {
    api: PortageOnlineClient<T>,
    name: String,
    pallet: String,
    entry: String,
}

impl<T> SubstrateFeeSchedule<T>
where
    T: Config,
{
    /// Instantiate a new SubstrateFeeSchedule object
    pub fn new(api: PortageOnlineClient<T>, name: &str, pallet: &str, entry: &str) -> Self {
        Self {
            api,
            name: name.to_owned(),
            pallet: pallet.to_owned(),
            entry: entry.to_owned(),
        }
    }
}

impl<T> std::fmt::Debug for SubstrateFeeSchedule<T>
where
    T: Config,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SubstrateFeeSchedule {{ chain: {}, entry: {}.{} }}",
            self.name, self.pallet, self.entry,
        )
    }
}

impl<T> std::fmt::Display for SubstrateFeeSchedule<T>
where
    T: Config,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SubstrateFeeSchedule {{ chain: {}, entry: {}.{} }}",
            self.name, self.pallet, self.entry,
        )
    }
}

#[async_trait]
impl<T> FeeSchedule for SubstrateFeeSchedule<T>
where
    T: Config + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    #[tracing::instrument(err, skip(self))]
    async fn units_per_second(&self, asset: &AssetId) -> Result<Option<Balance>, QueryError> {
        let read = asset_read(&self.pallet, &self.entry, asset);
        let fetched = self
            .api
            .fetch_storage(&read, None)
            .await
            .map_err(QueryError::from)?;
        let value = match fetched {
            Some(value) => value,
            None => return Ok(None),
        };
        let raw: u128 = from_value(value).map_err(SubstrateError::from)?;
        Ok(Some(Balance(raw.into())))
    }
}
