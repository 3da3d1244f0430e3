// --- File: crates/services/academichub_backend/src/service_factory.rs ---
use academichub_common::{
    config_error, log_result, share_directory, share_transport, AcademicHubError,
    SharedDirectory, SharedTransport,
};
use academichub_config::AppConfig;
use academichub_firebase::{FirebaseClient, FirestoreDirectory};
use tracing::info;

/// The external collaborators of the notification routes
#[derive(Clone)]
pub struct NotifyServices {
    pub directory: SharedDirectory,
    pub transport: SharedTransport,
}

impl NotifyServices {
    pub fn new(directory: SharedDirectory, transport: SharedTransport) -> Self {
        Self {
            directory,
            transport,
        }
    }
}

/// Builds the Firestore directory and the FCM transport from the configuration.
///
/// Returns `Ok(None)` when Firebase is switched off with `use_firebase = false`.
pub fn firebase_services(config: &AppConfig) -> Result<Option<NotifyServices>, AcademicHubError> {
    if !config.use_firebase {
        info!("Firebase disabled by configuration, push routes are not mounted");
        return Ok(None);
    }

    let firebase_config = config
        .firebase
        .as_ref()
        .ok_or_else(|| config_error("use_firebase is set but the [firebase] section is missing"))?;

    let transport = log_result(
        FirebaseClient::new(firebase_config.clone()),
        "FCM client ready",
        "Failed to create FCM client",
    )?;
    let directory = log_result(
        FirestoreDirectory::new(firebase_config.clone()),
        "Firestore directory ready",
        "Failed to create Firestore directory",
    )?;

    Ok(Some(NotifyServices::new(
        share_directory(directory),
        share_transport(transport),
    )))
}
