use solana_sdk::transaction::Transaction;
use wrapped_transfer_api::prelude::*;

pub fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, TransferError> {
    bincode::serialize(value).map_err(|e| TransferError::Serialization(e.to_string()))
}

pub fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T, TransferError> {
    bincode::deserialize(data).map_err(|e| TransferError::Serialization(e.to_string()))
}

/// Wire-format transaction as base64, the encoding `sendTransaction` accepts.
pub fn encode_transaction(transaction: &Transaction) -> Result<String, TransferError> {
    Ok(base64::encode(serialize(transaction)?))
}

pub fn decode_transaction(encoded: &str) -> Result<Transaction, TransferError> {
    let bytes = base64::decode(encoded).map_err(|e| TransferError::Serialization(e.to_string()))?;
    deserialize(&bytes)
}
