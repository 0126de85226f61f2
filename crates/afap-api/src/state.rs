//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use afap_auth::AccountService;
use afap_certificate::{CertificateRenderer, PdfCertificateRenderer};
use afap_core::config::AppConfig;
use afap_core::traits::Notifier;
use afap_database::Store;
use afap_service::certificate::CertificateService;
use afap_service::inspection::InspectionService;
use afap_service::notify::EmailNotifier;
use afap_service::permit::{NotificationDispatcher, PermissiveLifecycle, PermitService};
use afap_service::seed::SeedService;
use afap_service::stats::StatsService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// cheaply cloneable.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// The store (health checks, direct access in tests).
    pub store: Store,
    /// Registration, login, bearer resolution.
    pub accounts: AccountService,
    /// Permit registry and lifecycle.
    pub permits: PermitService,
    /// Certificate issuance and verification.
    pub certificates: CertificateService,
    /// Inspection scheduling.
    pub inspections: InspectionService,
    /// Reviewer dashboard.
    pub stats: StatsService,
    /// Demo seeding.
    pub seeder: SeedService,
}

impl AppState {
    /// Wire the default production collaborators: the log-simulated email
    /// notifier and the PDF certificate renderer.
    pub fn new(config: AppConfig, store: Store) -> Self {
        let renderer = Arc::new(PdfCertificateRenderer::new(&config.certificate));
        Self::with_collaborators(config, store, Arc::new(EmailNotifier::new()), renderer)
    }

    /// Wire the state with explicit notifier/renderer implementations
    /// (used by the test suites to inject recording doubles).
    pub fn with_collaborators(
        config: AppConfig,
        store: Store,
        notifier: Arc<dyn Notifier>,
        renderer: Arc<dyn CertificateRenderer>,
    ) -> Self {
        let config = Arc::new(config);

        let accounts = AccountService::new(store.users.clone(), &config.auth);
        let dispatcher =
            NotificationDispatcher::new(notifier, store.users.clone(), &config.notifier);
        let permits = PermitService::new(
            store.permits.clone(),
            Arc::new(PermissiveLifecycle),
            dispatcher,
        );
        let certificates = CertificateService::new(
            store.permits.clone(),
            store.downloads.clone(),
            renderer,
            &config.certificate,
        );
        let inspections = InspectionService::new(
            store.inspections.clone(),
            store.permits.clone(),
            store.users.clone(),
        );
        let stats = StatsService::new(
            store.permits.clone(),
            store.inspections.clone(),
            store.users.clone(),
        );
        let seeder = SeedService::new(store.clone());

        Self {
            config,
            store,
            accounts,
            permits,
            certificates,
            inspections,
            stats,
            seeder,
        }
    }
}
