use crate::{
    entities::contact::{ContactForm, ContactInsert},
    errors::AppError,
    repositories::contact::ContactRepository,
};
use validator::Validate;

const CONTACT_FIELDS_REQUIRED: &str = "Semua field (nama, email, telepon, pesan) wajib diisi.";
const CONTACT_SAVE_FAILED: &str = "Terjadi kesalahan teknis di server saat menyimpan data Anda. \
    Silakan coba lagi nanti atau hubungi administrator.";

pub struct ContactHandler<R>
where
    R: ContactRepository,
{
    pub contact_repo: R,
}

impl<R> ContactHandler<R>
where
    R: ContactRepository,
{
    pub fn new(contact_repo: R) -> Self {
        ContactHandler { contact_repo }
    }

    /// Handles a contact form submission, returning the stored message id
    pub async fn submit_contact_message(&self, form: ContactForm) -> Result<i32, AppError> {
        form.validate()
            .map_err(|e| AppError::missing_fields(CONTACT_FIELDS_REQUIRED, &e))?;

        let new_msg = ContactInsert::try_from(form)?;

        let id = self
            .contact_repo
            .create_contact_message(&new_msg)
            .await
            .map_err(|e| e.into_internal(CONTACT_SAVE_FAILED))?;

        tracing::info!(contact_id = id, "Contact message stored");

        Ok(id)
    }
}
