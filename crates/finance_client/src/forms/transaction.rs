use api_types::{
    category::Category,
    transaction::{Transaction, TransactionDraft},
    wallet::Wallet,
};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;

use super::{Form, FormError, Picker, PickerOption};
use crate::{
    money::{input_text, parse_amount},
    resource::Transactions,
};

/// Format of the date-time field, in local time.
pub const OCCURRED_AT_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionForm {
    pub wallet: Picker,
    pub category: Picker,
    /// Signed: a leading `-` records an expense.
    pub amount: String,
    pub note: String,
    /// Local date-time; empty means "now".
    pub occurred_at: String,
    tz: Tz,
    pending_wallet: Option<String>,
    pending_category: Option<String>,
}

impl TransactionForm {
    pub fn new(tz: Tz) -> Self {
        Self {
            wallet: Picker::default(),
            category: Picker::default(),
            amount: String::new(),
            note: String::new(),
            occurred_at: String::new(),
            tz,
            pending_wallet: None,
            pending_category: None,
        }
    }

    /// Seeds the form from an existing transaction. Transactions carry
    /// names only, so wallet and category are matched by label once the
    /// pickers have their options.
    pub fn from_transaction(tx: &Transaction, tz: Tz) -> Self {
        Self {
            amount: input_text(tx.amount, &tx.currency),
            note: tx.note.clone(),
            occurred_at: tx
                .occurred_at
                .with_timezone(&tz)
                .format(OCCURRED_AT_FORMAT)
                .to_string(),
            pending_wallet: Some(tx.wallet_name.clone()),
            pending_category: Some(tx.category_name.clone()),
            ..Self::new(tz)
        }
    }

    pub fn set_wallets(&mut self, wallets: &[Wallet]) {
        self.wallet
            .set_options(wallets.iter().map(PickerOption::from).collect());
        if let Some(label) = self.pending_wallet.take()
            && !self.wallet.select_by_label(&label)
        {
            tracing::debug!(wallet = %label, "wallet of edited transaction not found");
        }
    }

    pub fn set_categories(&mut self, categories: &[Category]) {
        self.category
            .set_options(categories.iter().map(PickerOption::from).collect());
        if let Some(label) = self.pending_category.take()
            && !self.category.select_by_label(&label)
        {
            tracing::debug!(category = %label, "category of edited transaction not found");
        }
    }

    /// Currency of the chosen wallet, used to parse the amount.
    pub fn currency(&self) -> &str {
        self.wallet
            .selected()
            .map(|option| option.detail.as_str())
            .unwrap_or_default()
    }

    fn parse_occurred_at(&self) -> Result<DateTime<Utc>, FormError> {
        let raw = self.occurred_at.trim();
        if raw.is_empty() {
            return Ok(Utc::now());
        }
        let naive = NaiveDateTime::parse_from_str(raw, OCCURRED_AT_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
            .map_err(|_| FormError::InvalidDate)?;
        self.tz
            .from_local_datetime(&naive)
            .earliest()
            .map(|local| local.with_timezone(&Utc))
            .ok_or(FormError::InvalidDate)
    }
}

impl Form for TransactionForm {
    type Resource = Transactions;

    const CREATE_FAILED: &'static str = "Thêm giao dịch thất bại";
    const UPDATE_FAILED: &'static str = "Cập nhật giao dịch thất bại";

    fn validate(&self) -> Result<TransactionDraft, FormError> {
        let wallet_id = self.wallet.selected_id().ok_or(FormError::Required("ví"))?;
        let category_id = self
            .category
            .selected_id()
            .ok_or(FormError::Required("danh mục"))?;
        let amount = parse_amount(&self.amount, self.currency())?;
        if amount == Decimal::ZERO {
            return Err(FormError::ZeroAmount);
        }
        Ok(TransactionDraft {
            wallet_id,
            category_id,
            amount,
            note: self.note.trim().to_string(),
            occurred_at: self.parse_occurred_at()?,
        })
    }
}
