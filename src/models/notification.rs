use serde::Deserialize;
use serde_json::Value;

/// One element of the webhook body array. Only `meta` is read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionNotification {
    #[serde(default)]
    pub meta: Option<TransactionMeta>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionMeta {
    /// Non-null when the transaction failed on chain.
    #[serde(default)]
    pub err: Option<Value>,

    #[serde(default, rename = "logMessages")]
    pub log_messages: Option<Vec<String>>,
}

impl TransactionNotification {
    pub fn log_messages(&self) -> &[String] {
        self.meta
            .as_ref()
            .and_then(|m| m.log_messages.as_deref())
            .unwrap_or_default()
    }
}

/// True when `element.meta.err` is present and not `null`.
///
/// Checked on the raw JSON so a failed transaction is reported as such even
/// when the rest of the element does not match [`TransactionNotification`].
pub fn raw_transaction_failed(element: &Value) -> bool {
    element
        .get("meta")
        .and_then(|meta| meta.get("err"))
        .is_some_and(|err| !err.is_null())
}
