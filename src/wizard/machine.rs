use async_trait::async_trait;
use futures::future::join_all;
use tracing::{info, warn};

use crate::dto::quote_dto::SubmitQuoteRequest;
use crate::util::validation::{validate_image_upload, MAX_IMAGE_COUNT};
use crate::wizard::draft::{DraftError, DraftStore, QuoteDraft};
use crate::wizard::images::{compress_image, UploadState, WizardImage};
use crate::wizard::steps::{
    validate_description, ContactDetails, ProjectDetails, ServiceSelection, WizardStep,
};

/// What the intake endpoint hands back on success.
#[derive(Debug, Clone)]
pub struct SubmissionReceipt {
    pub id: String,
}

/// How a submission attempt can fail from the wizard's point of view.
#[derive(Debug, Clone)]
pub enum SubmitError {
    /// The server rejected the payload; field messages for the visitor.
    Rejected(Vec<String>),
    /// Transport or server trouble; worth retrying as-is.
    Unavailable(String),
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitError::Rejected(errors) => write!(f, "rejected: {}", errors.join("; ")),
            SubmitError::Unavailable(msg) => write!(f, "unavailable: {}", msg),
        }
    }
}

impl std::error::Error for SubmitError {}

/// The intake contract as seen from the client.
#[async_trait]
pub trait QuoteSubmitter: Send + Sync {
    async fn upload_image(
        &self,
        file_name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<String, SubmitError>;

    async fn submit(&self, payload: SubmitQuoteRequest) -> Result<SubmissionReceipt, SubmitError>;
}

/// Fields being carried through one wizard screen.
#[derive(Debug, Clone)]
pub enum StepData {
    Service(ServiceSelection),
    Details(ProjectDetails),
    Media { description: String },
    Contact(ContactDetails),
}

impl StepData {
    fn step(&self) -> WizardStep {
        match self {
            StepData::Service(_) => WizardStep::Service,
            StepData::Details(_) => WizardStep::Details,
            StepData::Media { .. } => WizardStep::Media,
            StepData::Contact(_) => WizardStep::Contact,
        }
    }
}

#[derive(Debug)]
pub enum WizardError {
    /// The current step's gate did not pass; the step index is unchanged.
    StepInvalid(Vec<String>),
    /// Data for a different screen than the one showing.
    WrongStep {
        expected: WizardStep,
        given: WizardStep,
    },
    /// Review cannot submit while earlier steps are incomplete.
    Incomplete(Vec<WizardStep>),
    TermsNotAccepted,
    AlreadySubmitting,
    Draft(DraftError),
    Submission(SubmitError),
}

impl std::fmt::Display for WizardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WizardError::StepInvalid(errors) => {
                write!(f, "step not complete: {}", errors.join("; "))
            }
            WizardError::WrongStep { expected, given } => write!(
                f,
                "wrong step: showing step {}, got data for step {}",
                expected.number(),
                given.number()
            ),
            WizardError::Incomplete(steps) => {
                let numbers: Vec<String> =
                    steps.iter().map(|s| s.number().to_string()).collect();
                write!(f, "steps not finished: {}", numbers.join(", "))
            }
            WizardError::TermsNotAccepted => write!(f, "terms must be accepted"),
            WizardError::AlreadySubmitting => write!(f, "a submission is already in flight"),
            WizardError::Draft(e) => write!(f, "{}", e),
            WizardError::Submission(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for WizardError {}

impl From<DraftError> for WizardError {
    fn from(err: DraftError) -> Self {
        WizardError::Draft(err)
    }
}

/// Read-only recap assembled for the review screen.
#[derive(Debug, Clone)]
pub struct ReviewSummary {
    pub service: String,
    pub urgency: Option<&'static str>,
    pub project_size: Option<&'static str>,
    pub location: String,
    pub timeline: String,
    pub description: String,
    pub photo_count: usize,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: String,
}

/// The wizard itself: current screen, draft aggregate, attached photos, and
/// the in-flight submission guard.
pub struct QuoteWizard<S: DraftStore> {
    store: S,
    draft: QuoteDraft,
    step: WizardStep,
    images: Vec<WizardImage>,
    submitting: bool,
}

impl<S: DraftStore> QuoteWizard<S> {
    /// Open the wizard, resuming a stored draft when one is present.
    pub fn resume(store: S) -> Self {
        let draft = match store.load() {
            Ok(Some(draft)) => draft,
            Ok(None) => QuoteDraft::new(),
            Err(e) => {
                warn!("Discarding unreadable draft: {}", e);
                QuoteDraft::new()
            }
        };
        let step = draft.first_incomplete_step();
        QuoteWizard {
            store,
            draft,
            step,
            images: Vec::new(),
            submitting: false,
        }
    }

    pub fn current_step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &QuoteDraft {
        &self.draft
    }

    pub fn images(&self) -> &[WizardImage] {
        &self.images
    }

    fn stage(&mut self, data: StepData) -> Result<(), WizardError> {
        if data.step() != self.step {
            return Err(WizardError::WrongStep {
                expected: self.step,
                given: data.step(),
            });
        }
        match data {
            StepData::Service(form) => self.draft.service = form,
            StepData::Details(form) => self.draft.details = form,
            StepData::Media { description } => self.draft.description = description,
            StepData::Contact(form) => self.draft.contact = form,
        }
        Ok(())
    }

    fn gate_errors(&self) -> Vec<String> {
        match self.step {
            WizardStep::Service => self.draft.service.errors(),
            WizardStep::Details => self.draft.details.errors(),
            WizardStep::Media => {
                let mut errors = validate_description(&self.draft.description);
                if self.images.iter().any(|img| !img.is_settled()) {
                    errors.push("Wait for photo processing to finish".to_string());
                }
                errors
            }
            WizardStep::Contact => self.draft.contact.errors(),
            WizardStep::Review => Vec::new(),
        }
    }

    /// "Continue": persist the step's fields and advance by exactly one, but
    /// only through a passed gate.
    pub fn continue_step(&mut self, data: StepData) -> Result<WizardStep, WizardError> {
        self.stage(data)?;
        let errors = self.gate_errors();
        if !errors.is_empty() {
            return Err(WizardError::StepInvalid(errors));
        }
        self.draft.mark_complete(self.step);
        self.store.save(&self.draft)?;
        self.step = self.step.next();
        Ok(self.step)
    }

    /// "Save as Draft": persist the current step's fields without advancing;
    /// partial input is fine.
    pub fn save_draft(&mut self, data: StepData) -> Result<(), WizardError> {
        self.stage(data)?;
        self.store.save(&self.draft)?;
        Ok(())
    }

    /// "Back": one step, never discards entered data.
    pub fn back(&mut self) -> WizardStep {
        self.step = self.step.prev();
        self.step
    }

    /// "Start Over": wipes the stored draft, but only after explicit
    /// confirmation. Returns whether anything happened.
    pub fn start_over(&mut self, confirmed: bool) -> Result<bool, WizardError> {
        if !confirmed {
            return Ok(false);
        }
        self.store.clear()?;
        self.draft = QuoteDraft::new();
        self.images.clear();
        self.submitting = false;
        self.step = WizardStep::Service;
        Ok(true)
    }

    /// Queue a batch of photos. Files are accepted or rejected one by one; a
    /// bad file never blocks the rest of the batch.
    pub fn add_images(
        &mut self,
        files: Vec<(String, String, Vec<u8>)>,
    ) -> Vec<Result<(), String>> {
        let mut results = Vec::with_capacity(files.len());
        for (file_name, content_type, data) in files {
            if self.images.len() >= MAX_IMAGE_COUNT {
                results.push(Err(format!(
                    "{}: photo limit of {} reached",
                    file_name, MAX_IMAGE_COUNT
                )));
                continue;
            }
            match validate_image_upload(&file_name, &content_type, data.len()) {
                Ok(()) => {
                    self.images
                        .push(WizardImage::queued(file_name, content_type, data));
                    results.push(Ok(()));
                }
                Err(msg) => results.push(Err(msg)),
            }
        }
        results
    }

    pub fn remove_image(&mut self, index: usize) {
        if index < self.images.len() {
            self.images.remove(index);
        }
    }

    /// Compress every queued photo. Files run independently; one bad file
    /// marks only itself failed.
    pub async fn process_uploads(&mut self) {
        let pending: Vec<usize> = self
            .images
            .iter()
            .enumerate()
            .filter(|(_, img)| img.state == UploadState::Queued)
            .map(|(i, _)| i)
            .collect();

        for &i in &pending {
            self.images[i].state = UploadState::Compressing;
        }

        let jobs: Vec<_> = pending
            .into_iter()
            .map(|i| {
                let data = self.images[i].data.clone();
                async move { (i, compress_image(data).await) }
            })
            .collect();

        for (i, result) in join_all(jobs).await {
            match result {
                Ok(compressed) => {
                    info!(
                        "Compressed {} to {} bytes",
                        self.images[i].file_name,
                        compressed.len()
                    );
                    self.images[i].data = compressed;
                    self.images[i].content_type = "image/jpeg".to_string();
                    self.images[i].state = UploadState::Complete;
                }
                Err(msg) => {
                    warn!(
                        "Photo {} failed processing: {}",
                        self.images[i].file_name, msg
                    );
                    self.images[i].state = UploadState::Failed(msg);
                }
            }
        }
    }

    /// Read-only recap for the review screen.
    pub fn review_summary(&self) -> ReviewSummary {
        let details = &self.draft.details;
        let location = match (details.property_city.trim(), details.property_state.trim()) {
            ("", "") => String::new(),
            (city, "") => city.to_string(),
            ("", state) => state.to_string(),
            (city, state) => format!("{}, {}", city, state),
        };
        ReviewSummary {
            service: self.draft.service.service.clone(),
            urgency: self.draft.service.urgency.map(|u| u.label()),
            project_size: details.project_size.map(|s| s.label()),
            location,
            timeline: details.timeline.clone(),
            description: self.draft.description.clone(),
            photo_count: self
                .images
                .iter()
                .filter(|img| img.state == UploadState::Complete)
                .count(),
            contact_name: self.draft.contact.name.clone(),
            contact_email: self.draft.contact.email.clone(),
            contact_phone: self.draft.contact.phone.clone(),
        }
    }

    /// Everything the wizard collected that the intake payload has no
    /// structured field for travels in the message body.
    fn compose_message(&self) -> Option<String> {
        let mut lines = Vec::new();
        let description = self.draft.description.trim();
        if !description.is_empty() {
            lines.push(description.to_string());
        }
        if let Some(urgency) = self.draft.service.urgency {
            lines.push(format!("Urgency: {}", urgency.label()));
        }
        if let Some(size) = self.draft.details.project_size {
            lines.push(format!("Project size: {}", size.label()));
        }
        let timeline = self.draft.details.timeline.trim();
        if !timeline.is_empty() {
            lines.push(format!("Timeline: {}", timeline));
        }
        if !self.draft.service.scope_tags.is_empty() {
            lines.push(format!("Scope: {}", self.draft.service.scope_tags.join(", ")));
        }
        (!lines.is_empty()).then(|| lines.join("\n"))
    }

    /// Final submit from the review screen. On success the wizard is done
    /// and the stored draft is gone; on failure everything entered stays.
    pub async fn submit<T: QuoteSubmitter>(
        &mut self,
        terms_accepted: bool,
        submitter: &T,
    ) -> Result<SubmissionReceipt, WizardError> {
        if self.step != WizardStep::Review {
            return Err(WizardError::WrongStep {
                expected: self.step,
                given: WizardStep::Review,
            });
        }
        let missing: Vec<WizardStep> = [
            WizardStep::Service,
            WizardStep::Details,
            WizardStep::Media,
            WizardStep::Contact,
        ]
        .into_iter()
        .filter(|step| !self.draft.is_complete(*step))
        .collect();
        if !missing.is_empty() {
            return Err(WizardError::Incomplete(missing));
        }
        if !terms_accepted {
            return Err(WizardError::TermsNotAccepted);
        }
        if self.submitting {
            return Err(WizardError::AlreadySubmitting);
        }
        self.submitting = true;

        let mut image_urls = Vec::new();
        for image in self
            .images
            .iter()
            .filter(|img| img.state == UploadState::Complete)
        {
            match submitter
                .upload_image(&image.file_name, &image.content_type, image.data.clone())
                .await
            {
                Ok(url) => image_urls.push(url),
                Err(e) => warn!(
                    "Photo {} upload failed, submitting without it: {}",
                    image.file_name, e
                ),
            }
        }

        let contact = &self.draft.contact;
        let details = &self.draft.details;
        let payload = SubmitQuoteRequest {
            customer_name: Some(contact.name.clone()),
            email: Some(contact.email.clone()),
            phone: {
                let phone = contact.phone.trim();
                (!phone.is_empty()).then(|| phone.to_string())
            },
            service_requested: Some(self.draft.service.service.clone()),
            property_city: {
                let city = details.property_city.trim();
                (!city.is_empty()).then(|| city.to_string())
            },
            property_state: {
                let state = details.property_state.trim();
                (!state.is_empty()).then(|| state.to_string())
            },
            message: self.compose_message(),
            image_urls: (!image_urls.is_empty()).then_some(image_urls),
        };

        match submitter.submit(payload).await {
            Ok(receipt) => {
                // Success ends the wizard; the confirmation view re-fetches
                // by id instead of reading anything client-local.
                if let Err(e) = self.store.clear() {
                    warn!("Failed to clear stored draft: {}", e);
                }
                self.draft = QuoteDraft::new();
                self.images.clear();
                self.submitting = false;
                Ok(receipt)
            }
            Err(e) => {
                self.submitting = false;
                Err(WizardError::Submission(e))
            }
        }
    }
}
