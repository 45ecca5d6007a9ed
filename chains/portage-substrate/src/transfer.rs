use ethers_core::types::U256;
use portage_core::ExtrinsicTransfer;
use subxt::tx::DynamicTxPayload;
use subxt::ext::scale_value::Value;

use crate::utils::{asset_id_value, option_value};
use crate::SubstrateError;

/// Assemble the bridge pallet `transfer` dispatch described by an
/// extrinsic transfer. The pallet name comes from route configuration;
/// argument encoding follows the router calling convention with the asset
/// and fee asset in chain-local id form and the recipient as a
/// `MultiAddress::Id`.
pub fn extrinsic_payload(
    transfer: &ExtrinsicTransfer,
) -> Result<DynamicTxPayload<'static>, SubstrateError> {
    let amount = to_u128(transfer.amount)?;
    let fee = to_u128(transfer.fee)?;

    Ok(subxt::dynamic::tx(
        transfer.pallet.clone(),
        "transfer",
        vec![
            asset_id_value(&transfer.asset_id),
            Value::u128(amount),
            option_value(transfer.fee_asset_id.as_ref().map(asset_id_value)),
            Value::u128(fee),
            Value::u128(transfer.destination_domain as u128),
            Value::unnamed_variant("Id", [Value::from_bytes(&transfer.recipient)]),
        ],
    ))
}

fn to_u128(value: U256) -> Result<u128, SubstrateError> {
    if value.bits() > 128 {
        return Err(SubstrateError::AmountOverflow(value));
    }
    Ok(value.low_u128())
}
