use api_types::wallet::{Wallet, WalletDraft};

use super::{Form, FormError};
use crate::resource::Wallets;

pub const DEFAULT_CURRENCY: &str = "VND";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalletForm {
    pub name: String,
    pub icon: String,
    pub currency: String,
}

impl Default for WalletForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            icon: String::new(),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl WalletForm {
    pub fn from_wallet(wallet: &Wallet) -> Self {
        Self {
            name: wallet.name.clone(),
            icon: wallet.icon.clone(),
            currency: wallet.currency.clone(),
        }
    }
}

impl Form for WalletForm {
    type Resource = Wallets;

    const CREATE_FAILED: &'static str = "Thêm ví thất bại";
    const UPDATE_FAILED: &'static str = "Cập nhật ví thất bại";

    fn validate(&self) -> Result<WalletDraft, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::Required("tên ví"));
        }
        let currency = match self.currency.trim() {
            "" => DEFAULT_CURRENCY.to_string(),
            code => code.to_ascii_uppercase(),
        };
        Ok(WalletDraft {
            name: name.to_string(),
            icon: self.icon.trim().to_string(),
            currency,
        })
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::forms::{Modal, Submitted, testing::Recorder};

    #[tokio::test]
    async fn add_wallet_defaults_to_vnd() {
        let backend = Recorder::<Wallets>::new(false);
        let mut modal = Modal::add(WalletForm::default());
        modal.form_mut().name = " Ví tiền mặt ".to_string();

        assert_eq!(modal.submit(&backend).await, Submitted::Saved);
        assert!(!modal.is_open());
        let created = backend.created.lock().unwrap();
        assert_eq!(created[0].name, "Ví tiền mặt");
        assert_eq!(created[0].currency, "VND");
    }

    #[tokio::test]
    async fn blank_name_blocks_submit() {
        let backend = Recorder::<Wallets>::new(false);
        let mut modal = Modal::add(WalletForm::default());

        assert_eq!(modal.submit(&backend).await, Submitted::Invalid);
        assert!(modal.is_open());
        assert_eq!(modal.error(), Some("Vui lòng nhập tên ví"));
        assert!(backend.created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_update_keeps_modal_open() {
        let backend = Recorder::<Wallets>::new(true);
        let wallet = Wallet {
            id: Uuid::from_u128(7),
            name: "Bank".to_string(),
            icon: "🏦".to_string(),
            currency: "usd".to_string(),
        };
        let mut modal = Modal::edit(wallet.id, WalletForm::from_wallet(&wallet));

        assert_eq!(modal.submit(&backend).await, Submitted::Failed);
        assert!(modal.is_open());
        assert_eq!(modal.error(), Some("Cập nhật ví thất bại"));
        let updated = backend.updated.lock().unwrap();
        assert_eq!(updated[0].0, wallet.id);
        assert_eq!(updated[0].1.currency, "USD");
    }
}
