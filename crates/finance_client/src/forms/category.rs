use api_types::category::{Category, CategoryDraft, CategoryKind};

use super::{Form, FormError};
use crate::resource::Categories;

pub const DEFAULT_CATEGORY_ICON: &str = "📂";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryForm {
    pub name: String,
    pub icon: String,
    pub kind: CategoryKind,
}

impl CategoryForm {
    pub fn from_category(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            icon: category.icon.clone(),
            kind: category.kind,
        }
    }

    pub fn toggle_kind(&mut self) {
        self.kind = self.kind.toggle();
    }
}

impl Form for CategoryForm {
    type Resource = Categories;

    const CREATE_FAILED: &'static str = "Thêm danh mục thất bại";
    const UPDATE_FAILED: &'static str = "Cập nhật danh mục thất bại";

    fn validate(&self) -> Result<CategoryDraft, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::Required("tên danh mục"));
        }
        let icon = match self.icon.trim() {
            "" => DEFAULT_CATEGORY_ICON,
            icon => icon,
        };
        Ok(CategoryDraft {
            name: name.to_string(),
            icon: icon.to_string(),
            kind: self.kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{Modal, Submitted, testing::Recorder};

    #[test]
    fn blank_icon_gets_default() {
        let form = CategoryForm {
            name: "Ăn uống".to_string(),
            ..CategoryForm::default()
        };
        let draft = form.validate().unwrap();
        assert_eq!(draft.icon, DEFAULT_CATEGORY_ICON);
        assert_eq!(draft.kind, CategoryKind::Expense);
    }

    #[tokio::test]
    async fn failed_create_reports_inline() {
        let backend = Recorder::<Categories>::new(true);
        let mut modal = Modal::add(CategoryForm {
            name: "Lương".to_string(),
            ..CategoryForm::default()
        });
        modal.form_mut().toggle_kind();

        assert_eq!(modal.submit(&backend).await, Submitted::Failed);
        assert_eq!(modal.error(), Some("Thêm danh mục thất bại"));
        assert_eq!(
            backend.created.lock().unwrap()[0].kind,
            CategoryKind::Income
        );
    }
}
