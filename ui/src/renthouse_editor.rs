//! What the renthouse editor page does, separated from how it renders.
//!
//! Operations are written against [`RenthouseService`] so the page can use
//! the real [`APIClient`] while tests count exactly which calls were made.

use payloads::{
    APIClient, ClientError, Renthouse, RenthouseId,
    requests::{self, CreateRenthouse, ImageUpload, ImageValidation},
};
use std::future::Future;

use crate::renthouse_form::{EditorState, FieldErrors, RenthouseForm};

/// The backend operations the editor needs.
#[allow(async_fn_in_trait)]
pub trait RenthouseService {
    async fn get_renthouse(
        &self,
        renthouse_id: RenthouseId,
    ) -> Result<Renthouse, ClientError>;

    async fn create_renthouse(
        &self,
        details: &CreateRenthouse,
    ) -> Result<Renthouse, ClientError>;

    async fn update_renthouse(
        &self,
        renthouse_id: RenthouseId,
        details: &CreateRenthouse,
    ) -> Result<Renthouse, ClientError>;

    async fn upload_image(
        &self,
        upload: ImageUpload,
    ) -> Result<String, ClientError>;

    fn asset_url(&self, path: &str) -> String;
}

impl RenthouseService for APIClient {
    async fn get_renthouse(
        &self,
        renthouse_id: RenthouseId,
    ) -> Result<Renthouse, ClientError> {
        APIClient::get_renthouse(self, &renthouse_id).await
    }

    async fn create_renthouse(
        &self,
        details: &CreateRenthouse,
    ) -> Result<Renthouse, ClientError> {
        APIClient::create_renthouse(self, details).await
    }

    async fn update_renthouse(
        &self,
        renthouse_id: RenthouseId,
        details: &CreateRenthouse,
    ) -> Result<Renthouse, ClientError> {
        APIClient::update_renthouse(self, &renthouse_id, details).await
    }

    async fn upload_image(
        &self,
        upload: ImageUpload,
    ) -> Result<String, ClientError> {
        APIClient::upload_image(self, upload).await
    }

    fn asset_url(&self, path: &str) -> String {
        APIClient::asset_url(self, path)
    }
}

/// Whether the page creates a new renthouse or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(RenthouseId),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("\"{0}\" is not a valid property id")]
pub struct InvalidEditId(pub String);

impl EditorMode {
    /// Mode from the `edit` query parameter. A missing or empty value means
    /// create; anything else must be a renthouse id.
    pub fn from_query(edit: Option<&str>) -> Result<Self, InvalidEditId> {
        match edit.map(str::trim) {
            None | Some("") => Ok(Self::Create),
            Some(raw) => raw
                .parse()
                .map(Self::Edit)
                .map_err(|_| InvalidEditId(raw.to_string())),
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self, Self::Edit(_))
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Create => "Add New Property",
            Self::Edit(_) => "Edit Property",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            Self::Create => "Create a new rental property to manage",
            Self::Edit(_) => "Update your rental property information",
        }
    }

    pub fn form_description(&self) -> &'static str {
        match self {
            Self::Create => "Fill in the details for your new rental property",
            Self::Edit(_) => "Update the details for your rental property",
        }
    }

    pub fn submit_label(&self, saving: bool) -> &'static str {
        match (self, saving) {
            (Self::Create, false) => "Create Property",
            (Self::Create, true) => "Creating...",
            (Self::Edit(_), false) => "Update Property",
            (Self::Edit(_), true) => "Updating...",
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            Self::Create => "Property created successfully!",
            Self::Edit(_) => "Property updated successfully!",
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::Create => "Failed to create property",
            Self::Edit(_) => "Failed to update property",
        }
    }
}

/// Fetch an existing renthouse and build the prefilled editor state.
pub async fn load<S: RenthouseService>(
    service: &S,
    renthouse_id: RenthouseId,
) -> Result<EditorState, ClientError> {
    let renthouse = service.get_renthouse(renthouse_id).await?;
    Ok(EditorState::from_renthouse(&renthouse, |path| {
        service.asset_url(path)
    }))
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// Nothing was sent; the form has field errors to show.
    #[error("Please correct the highlighted fields")]
    Invalid(FieldErrors),
    #[error(transparent)]
    Api(#[from] ClientError),
}

/// Validate the form and send it to create or update, depending on mode.
/// Invalid forms never reach the service.
pub async fn submit<S: RenthouseService>(
    service: &S,
    mode: EditorMode,
    form: &RenthouseForm,
) -> Result<Renthouse, SubmitError> {
    let details = form.validate().map_err(SubmitError::Invalid)?;

    let saved = match mode {
        EditorMode::Create => service.create_renthouse(&details).await?,
        EditorMode::Edit(renthouse_id) => {
            service.update_renthouse(renthouse_id, &details).await?
        }
    };

    tracing::info!(renthouse_id = %saved.id, ?mode, "Saved renthouse");
    Ok(saved)
}

/// Metadata of the file the user picked, known before reading its bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: String,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadedImage {
    /// Path to store in the form.
    pub path: String,
    /// Full URL to show in the preview.
    pub preview_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Please select a valid image file")]
    NotAnImage,
    #[error("Image size must be less than 5MB")]
    TooLarge,
    #[error("Failed to upload image")]
    Read(String),
    #[error("{}", upload_failure_message(.0))]
    Api(#[from] ClientError),
}

/// The server's explanation when it gave one, a generic message otherwise.
fn upload_failure_message(error: &ClientError) -> String {
    match error {
        ClientError::APIError(_, message) if !message.is_empty() => {
            message.clone()
        }
        _ => "Failed to upload image".to_string(),
    }
}

/// Check the picked file, read it, and upload it.
///
/// `read` is only called once the file passed the type and size checks,
/// so rejected files are never read or sent.
pub async fn upload_image<S, R, Fut>(
    service: &S,
    file: &SelectedFile,
    read: R,
) -> Result<UploadedImage, UploadError>
where
    S: RenthouseService,
    R: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<u8>, UploadError>>,
{
    match requests::validate_image(&file.content_type, file.size) {
        ImageValidation::Valid => {}
        ImageValidation::NotAnImage => return Err(UploadError::NotAnImage),
        ImageValidation::TooLarge => return Err(UploadError::TooLarge),
    }

    let data = read().await?;
    let path = service
        .upload_image(ImageUpload {
            file_name: file.name.clone(),
            content_type: file.content_type.clone(),
            data,
        })
        .await?;

    Ok(UploadedImage {
        preview_url: service.asset_url(&path),
        path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use payloads::MAX_IMAGE_SIZE;
    use reqwest::StatusCode;
    use rust_decimal::dec;
    use std::cell::{Cell, RefCell};

    use crate::renthouse_form::Field;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Get(RenthouseId),
        Create(CreateRenthouse),
        Update(RenthouseId, CreateRenthouse),
        Upload(String, usize),
    }

    #[derive(Default)]
    struct MockService {
        calls: RefCell<Vec<Call>>,
        fail_with: Option<&'static str>,
    }

    impl MockService {
        fn failing(message: &'static str) -> Self {
            Self {
                fail_with: Some(message),
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        fn respond<T>(&self, call: Call, value: T) -> Result<T, ClientError> {
            self.calls.borrow_mut().push(call);
            match self.fail_with {
                Some(message) => Err(ClientError::APIError(
                    StatusCode::BAD_REQUEST,
                    message.to_string(),
                )),
                None => Ok(value),
            }
        }
    }

    fn saved(id: i64, details: &CreateRenthouse) -> Renthouse {
        Renthouse {
            id: RenthouseId(id),
            name: details.name.clone(),
            description: details.description.clone(),
            latitude: details.latitude,
            longitude: details.longitude,
            address: details.address.clone(),
            base_rent: details.base_rent,
            water_fee: details.water_fee,
            electricity_fee: details.electricity_fee,
            image_url: details.image_url.clone(),
            qr_code_image: details.qr_code_image.clone(),
        }
    }

    impl RenthouseService for MockService {
        async fn get_renthouse(
            &self,
            renthouse_id: RenthouseId,
        ) -> Result<Renthouse, ClientError> {
            let stored = Renthouse {
                id: renthouse_id,
                name: "Garden Flats".into(),
                description: Some("Quiet street".into()),
                latitude: -33.8688,
                longitude: 151.2093,
                address: "8 Elm Street".into(),
                base_rent: dec!(950.00),
                water_fee: dec!(20),
                electricity_fee: dec!(35.75),
                image_url: None,
                qr_code_image: Some("/api/upload/files/qr.png".into()),
            };
            self.respond(Call::Get(renthouse_id), stored)
        }

        async fn create_renthouse(
            &self,
            details: &CreateRenthouse,
        ) -> Result<Renthouse, ClientError> {
            self.respond(Call::Create(details.clone()), saved(100, details))
        }

        async fn update_renthouse(
            &self,
            renthouse_id: RenthouseId,
            details: &CreateRenthouse,
        ) -> Result<Renthouse, ClientError> {
            self.respond(
                Call::Update(renthouse_id, details.clone()),
                saved(renthouse_id.0, details),
            )
        }

        async fn upload_image(
            &self,
            upload: ImageUpload,
        ) -> Result<String, ClientError> {
            self.respond(
                Call::Upload(upload.file_name.clone(), upload.data.len()),
                format!("/api/upload/files/{}", upload.file_name),
            )
        }

        fn asset_url(&self, path: &str) -> String {
            payloads::api_client::asset_url("http://localhost:8080/api", path)
        }
    }

    fn filled_form() -> RenthouseForm {
        RenthouseForm {
            name: "Sunny Apartments".into(),
            latitude: "40.7128".into(),
            longitude: "-74.0060".into(),
            address: "123 Main Street".into(),
            base_rent: "1500".into(),
            water_fee: "12.50".into(),
            electricity_fee: "30".into(),
            ..RenthouseForm::default()
        }
    }

    fn png(size: u64) -> SelectedFile {
        SelectedFile {
            name: "front.png".into(),
            content_type: "image/png".into(),
            size,
        }
    }

    #[test]
    fn mode_from_query() {
        assert_eq!(EditorMode::from_query(None), Ok(EditorMode::Create));
        assert_eq!(EditorMode::from_query(Some("")), Ok(EditorMode::Create));
        assert_eq!(
            EditorMode::from_query(Some("42")),
            Ok(EditorMode::Edit(RenthouseId(42)))
        );
        assert_eq!(
            EditorMode::from_query(Some("abc")),
            Err(InvalidEditId("abc".into()))
        );
    }

    #[test]
    fn mode_labels() {
        let edit = EditorMode::Edit(RenthouseId(1));
        assert_eq!(EditorMode::Create.title(), "Add New Property");
        assert_eq!(edit.title(), "Edit Property");
        assert_eq!(EditorMode::Create.submit_label(true), "Creating...");
        assert_eq!(edit.submit_label(false), "Update Property");
        assert_eq!(edit.failure_message(), "Failed to update property");
    }

    #[test]
    fn load_prefills_form_and_previews() {
        let service = MockService::default();
        let state = block_on(load(&service, RenthouseId(5))).unwrap();

        assert_eq!(service.calls(), vec![Call::Get(RenthouseId(5))]);
        assert_eq!(state.form.name, "Garden Flats");
        assert_eq!(state.form.description, "Quiet street");
        assert_eq!(state.form.latitude, "-33.8688");
        assert_eq!(state.form.base_rent, "950.00");
        assert_eq!(state.form.water_fee, "20");
        assert_eq!(state.form.electricity_fee, "35.75");
        assert_eq!(state.property_image.preview_url, None);
        assert_eq!(
            state.qr_code_image.preview_url.as_deref(),
            Some("http://localhost:8080/api/upload/files/qr.png")
        );
    }

    #[test]
    fn load_failure_is_reported() {
        let service = MockService::failing("Renthouse not found");
        let err = block_on(load(&service, RenthouseId(5))).unwrap_err();
        assert_eq!(err.to_string(), "Renthouse not found");
    }

    #[test]
    fn invalid_form_makes_no_api_call() {
        let service = MockService::default();
        let mut form = filled_form();
        form.name.clear();

        let err = block_on(submit(&service, EditorMode::Create, &form))
            .unwrap_err();

        match err {
            SubmitError::Invalid(errors) => assert_eq!(
                errors.get(Field::Name),
                Some("Property name is required")
            ),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(service.calls().is_empty());
    }

    #[test]
    fn bad_base_rent_makes_no_api_call() {
        let service = MockService::default();
        let mut form = filled_form();
        form.base_rent = "12.345".into();

        let err = block_on(submit(
            &service,
            EditorMode::Edit(RenthouseId(3)),
            &form,
        ))
        .unwrap_err();

        assert!(matches!(
            err,
            SubmitError::Invalid(ref errors)
                if errors.get(Field::BaseRent) == Some("Invalid base rent format")
        ));
        assert!(service.calls().is_empty());
    }

    #[test]
    fn create_mode_calls_create_with_converted_values() {
        let service = MockService::default();
        let saved =
            block_on(submit(&service, EditorMode::Create, &filled_form()))
                .unwrap();

        assert_eq!(saved.id, RenthouseId(100));
        let calls = service.calls();
        assert_eq!(calls.len(), 1);
        let Call::Create(details) = &calls[0] else {
            panic!("expected a create call, got {calls:?}");
        };
        assert_eq!(details.base_rent, dec!(1500));
        assert_eq!(details.water_fee, dec!(12.50));
        assert_eq!(details.latitude, 40.7128);
        assert_eq!(details.description, None);
    }

    #[test]
    fn edit_mode_calls_update_instead() {
        let service = MockService::default();
        block_on(submit(
            &service,
            EditorMode::Edit(RenthouseId(7)),
            &filled_form(),
        ))
        .unwrap();

        let calls = service.calls();
        assert_eq!(calls.len(), 1);
        assert!(matches!(calls[0], Call::Update(RenthouseId(7), _)));
    }

    #[test]
    fn api_failure_leaves_form_untouched() {
        let service = MockService::failing("Failed to create renthouse");
        let form = filled_form();
        let before = form.clone();

        let err =
            block_on(submit(&service, EditorMode::Create, &form)).unwrap_err();

        assert!(matches!(err, SubmitError::Api(_)));
        assert_eq!(form, before);
        assert_eq!(service.calls().len(), 1);
    }

    #[test]
    fn non_image_is_rejected_before_reading_or_uploading() {
        let service = MockService::default();
        let read_called = Cell::new(false);
        let file = SelectedFile {
            name: "lease.pdf".into(),
            content_type: "application/pdf".into(),
            size: 1024,
        };

        let flag = &read_called;
        let err = block_on(upload_image(&service, &file, move || async move {
            flag.set(true);
            Ok(vec![0; 1024])
        }))
        .unwrap_err();

        assert!(matches!(err, UploadError::NotAnImage));
        assert_eq!(err.to_string(), "Please select a valid image file");
        assert!(!read_called.get());
        assert!(service.calls().is_empty());
    }

    #[test]
    fn oversized_image_is_rejected_before_reading_or_uploading() {
        let service = MockService::default();
        let read_called = Cell::new(false);

        let flag = &read_called;
        let file = png(MAX_IMAGE_SIZE + 1);

        let err = block_on(upload_image(&service, &file, move || async move {
            flag.set(true);
            Ok(Vec::new())
        }))
        .unwrap_err();

        assert!(matches!(err, UploadError::TooLarge));
        assert_eq!(err.to_string(), "Image size must be less than 5MB");
        assert!(!read_called.get());
        assert!(service.calls().is_empty());
    }

    #[test]
    fn valid_image_is_uploaded_and_previewed() {
        let service = MockService::default();

        let uploaded =
            block_on(upload_image(&service, &png(3), || async {
                Ok(vec![1, 2, 3])
            }))
            .unwrap();

        assert_eq!(service.calls(), vec![Call::Upload("front.png".into(), 3)]);
        assert_eq!(uploaded.path, "/api/upload/files/front.png");
        assert_eq!(
            uploaded.preview_url,
            "http://localhost:8080/api/upload/files/front.png"
        );
    }

    #[test]
    fn upload_failure_uses_server_message() {
        let service = MockService::failing("Only image files are allowed");
        let err = block_on(upload_image(&service, &png(3), || async {
            Ok(vec![1, 2, 3])
        }))
        .unwrap_err();
        assert_eq!(err.to_string(), "Only image files are allowed");
    }

    #[test]
    fn upload_failure_without_server_message_is_generic() {
        let err = UploadError::from(ClientError::UnexpectedResponse(
            StatusCode::PAYLOAD_TOO_LARGE,
        ));
        assert_eq!(err.to_string(), "Failed to upload image");
    }

    #[test]
    fn unreadable_file_is_not_uploaded() {
        let service = MockService::default();
        let err = block_on(upload_image(&service, &png(3), || async {
            Err(UploadError::Read("NotReadableError".into()))
        }))
        .unwrap_err();
        assert_eq!(err.to_string(), "Failed to upload image");
        assert!(service.calls().is_empty());
    }
}
