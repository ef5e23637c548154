use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use mailforge::{
    init_logging, DesignPersistence, DesignerEvent, DesignerState, EventBus, EventFilter,
    InMemoryCampaignStore, SettingsPersistence, TemplateLibrary, BUILD_DATE, VERSION,
};

const DEFAULT_TEMPLATE: &str = "just-listed-classic";

/// Opens a session with the configured defaults, loads a template, saves it
/// as a campaign and reopens it.
///
/// Usage: `mailforge [TEMPLATE_ID] [CONFIG_PATH]`
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;
    tracing::info!("MailForge {} (built {})", VERSION, BUILD_DATE);

    let mut args = std::env::args().skip(1);
    let template_id = args.next().unwrap_or_else(|| DEFAULT_TEMPLATE.to_string());
    let config_path = match args.next() {
        Some(path) => PathBuf::from(path),
        None => SettingsPersistence::default_config_path()?,
    };

    let settings = SettingsPersistence::load_or_default(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    let config = settings.config();
    tracing::info!(
        "Brand theme for {}:\n{}",
        config.branding.app_name,
        config.branding.to_css_root()
    );

    let bus = Arc::new(EventBus::new());
    let mut state = DesignerState::new(config.designer.to_options(), bus.clone());
    state.subscribe(EventFilter::All, |event: DesignerEvent| {
        tracing::debug!("{}", event.description());
    });

    let library = TemplateLibrary::builtin();
    state
        .load_template(library, &template_id)
        .with_context(|| format!("opening template {:?}", template_id))?;
    for row in state.layer_rows() {
        tracing::info!("layer {:>3}  {:<20} {}", row.id, row.label, row.caption);
    }

    let persistence = DesignPersistence::new(Arc::new(InMemoryCampaignStore::new()));
    let outcome = state.save(&persistence).await?;
    let campaign_id = outcome
        .campaign_id()
        .cloned()
        .context("save was suppressed")?;

    let reopened = persistence
        .load(&campaign_id, config.designer.to_options(), bus)
        .await?;
    tracing::info!(
        "Campaign {} reopened with {} elements on a {} canvas",
        campaign_id,
        reopened.canvas().element_count(),
        reopened.canvas().size().label()
    );

    state.end_session();
    Ok(())
}
