//! Product administration
//!
//! Coordinates the product table and the product form. A single [`FormState`] says whether the
//! form is closed, creating a new product, or editing an existing one.

use tracing::debug;

use crate::{
    admin::product_form::ProductForm,
    operations::ProductCatalog,
    products::{Product, ProductId, ProductUpdate},
    store::StoreError,
};

/// What the product form is doing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormState {
    /// Form hidden
    #[default]
    Closed,

    /// Adding a new product
    Creating,

    /// Editing the product with this id
    Editing(ProductId),
}

impl FormState {
    /// Whether the form is shown.
    pub fn is_open(&self) -> bool {
        !matches!(self, FormState::Closed)
    }

    /// Id of the product being edited.
    pub fn editing_id(&self) -> Option<&ProductId> {
        match self {
            FormState::Editing(id) => Some(id),
            FormState::Closed | FormState::Creating => None,
        }
    }

    /// Form heading.
    pub fn title(&self) -> &'static str {
        match self {
            FormState::Editing(_) => "상품 수정",
            FormState::Closed | FormState::Creating => "새 상품 추가",
        }
    }

    /// Submit button label.
    pub fn submit_label(&self) -> &'static str {
        match self {
            FormState::Editing(_) => "수정",
            FormState::Closed | FormState::Creating => "추가",
        }
    }
}

/// Product table and form coordinator
#[derive(Debug, Default)]
pub struct AdminProducts {
    state: FormState,
    form: ProductForm,
}

impl AdminProducts {
    /// Create with the form closed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current form state.
    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// The product form.
    pub fn form(&self) -> &ProductForm {
        &self.form
    }

    /// The product form, for editing.
    pub fn form_mut(&mut self) -> &mut ProductForm {
        &mut self.form
    }

    /// Open the form with an empty draft.
    pub fn start_new_product(&mut self) {
        debug!("product form opened for a new product");
        self.state = FormState::Creating;
        self.form.reset();
    }

    /// Open the form pre-filled with a product.
    pub fn start_edit_product(&mut self, product: &Product) {
        debug!(product = %product.id, "product form opened for editing");
        self.state = FormState::Editing(product.id.clone());
        self.form.load(product);
    }

    /// Add or update from the draft, then close the form. Does nothing while closed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ProductNotFound`] if the edited product no longer exists; the form
    /// stays open.
    pub fn submit(&mut self, catalog: &mut impl ProductCatalog) -> Result<(), StoreError> {
        match &self.state {
            FormState::Closed => return Ok(()),
            FormState::Creating => {
                catalog.add_product(self.form.draft().clone());
            }
            FormState::Editing(id) => {
                catalog.update_product(id, ProductUpdate::from(self.form.draft().clone()))?;
            }
        }

        self.close();

        Ok(())
    }

    /// Close the form, discarding the draft.
    pub fn cancel(&mut self) {
        self.close();
    }

    /// Delete a product. Closes the form if it was editing that product.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ProductNotFound`] for an unknown id.
    pub fn delete_product(
        &mut self,
        id: &ProductId,
        catalog: &mut impl ProductCatalog,
    ) -> Result<Product, StoreError> {
        let product = catalog.delete_product(id)?;

        if self.state.editing_id() == Some(id) {
            self.close();
        }

        Ok(product)
    }

    fn close(&mut self) {
        self.state = FormState::Closed;
        self.form.reset();
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::{
        products::{DiscountTier, NewProduct},
        store::ShopStore,
    };

    fn product() -> Product {
        Product {
            id: ProductId::from("p1"),
            name: "상품1".to_string(),
            price: 10_000,
            stock: 20,
            description: "최고급 품질의 프리미엄 상품입니다.".to_string(),
            discounts: vec![DiscountTier::new(10, rust_decimal::Decimal::new(1, 1))],
        }
    }

    #[test]
    fn starts_closed() {
        let admin = AdminProducts::new();

        assert_eq!(admin.state(), &FormState::Closed);
        assert!(!admin.state().is_open());
    }

    #[test]
    fn start_new_opens_with_empty_draft() {
        let mut admin = AdminProducts::new();
        admin.form_mut().set_name("leftover");

        admin.start_new_product();

        assert_eq!(admin.state(), &FormState::Creating);
        assert_eq!(admin.form().draft(), &NewProduct::default());
        assert_eq!(admin.state().title(), "새 상품 추가");
    }

    #[test]
    fn last_start_wins() {
        let mut admin = AdminProducts::new();
        let p = product();

        admin.start_new_product();
        admin.start_edit_product(&p);

        assert_eq!(admin.state(), &FormState::Editing(p.id.clone()));
        assert_eq!(admin.form().draft(), &NewProduct::from(&p));
        assert_eq!(admin.state().submit_label(), "수정");
    }

    #[test]
    fn submit_while_creating_adds_and_closes() -> TestResult {
        let mut admin = AdminProducts::new();
        let mut store = ShopStore::new();

        admin.start_new_product();
        admin.form_mut().set_name("새 상품");
        admin.form_mut().input_price("1000");
        admin.submit(&mut store)?;

        assert_eq!(admin.state(), &FormState::Closed);
        assert_eq!(admin.form().draft(), &NewProduct::default());
        assert_eq!(
            store.products().first().map(|p| p.name.as_str()),
            Some("새 상품")
        );

        Ok(())
    }

    #[test]
    fn submit_while_editing_updates_and_closes() -> TestResult {
        let mut admin = AdminProducts::new();
        let mut store = ShopStore::new();
        let id = store.add_product(NewProduct::from(&product()));
        let existing = store.product(&id).cloned().ok_or("missing product")?;

        admin.start_edit_product(&existing);
        admin.form_mut().input_stock("3");
        admin.submit(&mut store)?;

        assert_eq!(admin.state(), &FormState::Closed);
        assert_eq!(store.product(&id).map(|p| p.stock), Some(3));
        assert_eq!(store.products().len(), 1);

        Ok(())
    }

    #[test]
    fn submit_for_deleted_product_keeps_form_open() {
        let mut admin = AdminProducts::new();
        let mut store = ShopStore::new();

        admin.start_edit_product(&product());

        assert!(admin.submit(&mut store).is_err());
        assert!(admin.state().is_open());
    }

    #[test]
    fn submit_while_closed_does_nothing() -> TestResult {
        let mut admin = AdminProducts::new();
        let mut store = ShopStore::new();

        admin.submit(&mut store)?;

        assert!(store.products().is_empty());

        Ok(())
    }

    #[test]
    fn deleting_edited_product_closes_form() -> TestResult {
        let mut admin = AdminProducts::new();
        let mut store = ShopStore::new();
        let id = store.add_product(NewProduct::from(&product()));
        let existing = store.product(&id).cloned().ok_or("missing product")?;

        admin.start_edit_product(&existing);
        admin.delete_product(&id, &mut store)?;

        assert_eq!(admin.state(), &FormState::Closed);
        assert!(store.products().is_empty());

        Ok(())
    }

    #[test]
    fn cancel_closes_and_discards_draft() {
        let mut admin = AdminProducts::new();

        admin.start_edit_product(&product());
        admin.cancel();

        assert_eq!(admin.state(), &FormState::Closed);
        assert_eq!(admin.form().draft(), &NewProduct::default());
    }
}
