use std::sync::Arc;

use crate::application::services::UploadService;
use crate::domain::UploadPolicy;

#[derive(Clone)]
pub struct AppState {
    pub upload_service: Arc<UploadService>,
    pub upload_policy: Arc<UploadPolicy>,
}

impl AppState {
    pub fn new(upload_service: Arc<UploadService>, upload_policy: UploadPolicy) -> Self {
        Self {
            upload_service,
            upload_policy: Arc::new(upload_policy),
        }
    }
}
