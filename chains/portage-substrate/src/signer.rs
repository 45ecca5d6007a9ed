use color_eyre::{
    eyre::{bail, eyre},
    Result,
};
use portage_configuration::app::SignerConf;
use subxt::{
    ext::sp_core::Pair,
    ext::sp_runtime::traits::{IdentifyAccount, Verify},
    tx::{PairSigner, Signer},
    Config,
};

/// Substrate signer variants
pub enum SubstrateSigners<T: Config, P: Pair> {
    /// Local signer, instantiated from local private key
    Local(PairSigner<T, P>),
}

impl<T, P> SubstrateSigners<T, P>
where
    T: Config,
    T::Signature: From<P::Signature>,
    <T::Signature as Verify>::Signer: From<P::Public> + IdentifyAccount<AccountId = T::AccountId>,
    <T as Config>::AccountId: std::fmt::Display,
    P: Pair,
    P::Public: std::fmt::Display,
{
    /// Build a signer from configuration. `Node` carries no local key and
    /// cannot sign.
    pub fn try_from_conf(conf: &SignerConf) -> Result<Self> {
        match conf {
            SignerConf::HexKey(key) => {
                let formatted_key = format!("0x{}", key.as_ref());
                let pair = P::from_string(&formatted_key, None)
                    .map_err(|e| eyre!("Invalid signing key: {:?}", e))?;
                tracing::info!("Instantiated tx signer with pubkey: {}", pair.public());

                let pair_signer = PairSigner::<T, _>::new(pair);
                tracing::info!("Tx signer account id: {}", pair_signer.account_id());

                Ok(Self::Local(pair_signer))
            }
            SignerConf::Node => bail!("No node signer support"),
        }
    }

    /// Well-known dev signer, for signing fee estimation payloads when no
    /// key is configured. Fees do not depend on the signing account.
    pub fn estimation() -> Result<Self> {
        let pair = P::from_string("//Alice", None)
            .map_err(|e| eyre!("Could not derive dev pair: {:?}", e))?;
        Ok(Self::Local(PairSigner::new(pair)))
    }
}

impl<T: Config, P: Pair> Signer<T> for SubstrateSigners<T, P>
where
    T: Config,
    T::Signature: From<P::Signature>,
    <T::Signature as Verify>::Signer: From<P::Public> + IdentifyAccount<AccountId = T::AccountId>,
    T::AccountId: Into<T::Address> + Clone + 'static,
    P::Signature: Into<T::Signature> + 'static,
    P: Pair + 'static,
{
    fn account_id(&self) -> &<T as Config>::AccountId {
        match self {
            SubstrateSigners::Local(signer) => signer.account_id(),
        }
    }

    fn address(&self) -> <T as Config>::Address {
        match self {
            SubstrateSigners::Local(signer) => signer.address(),
        }
    }

    fn sign(&self, signer_payload: &[u8]) -> <T as Config>::Signature {
        match self {
            SubstrateSigners::Local(signer) => signer.sign(signer_payload),
        }
    }
}
