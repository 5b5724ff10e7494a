use course_portal::application::RestoreOutcome;
use course_portal::config::PortalConfig;
use course_portal::Portal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = PortalConfig::load()?;
    config.logging.init_tracing();
    config.validate()?;

    tracing::info!(
        base_url = %config.api.base_url,
        backend = ?config.session.backend,
        "Starting course portal core"
    );

    let portal = Portal::from_config(&config)?;

    match portal.start().await {
        RestoreOutcome::Restored => {
            let user = portal.session.current_user();
            let dashboard = portal.dashboard();
            tracing::info!(
                user = ?user.as_ref().map(|u| u.display_name_or_email()),
                overall_percent = %dashboard.overall_percent,
                "Session restored"
            );
        }
        RestoreOutcome::Discarded => {
            tracing::warn!("Persisted session was unreadable and has been cleared")
        }
        RestoreOutcome::NoSession | RestoreOutcome::AlreadyRestored => {
            tracing::info!("No session; learner views will redirect to login")
        }
    }

    Ok(())
}
