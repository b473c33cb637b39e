use anyhow::{Context, Result};
use lottery_core::Msg;
use lottery_logging::{lottery_info, lottery_warn};
use lottery_store::Store;

/// Decides the first message from what is stored.
///
/// `None` means no draw list is saved and configuration entry is shown.
pub fn startup_msg(store: &Store, resume: bool) -> Result<Option<Msg>> {
    let config = store
        .config()
        .load()
        .with_context(|| format!("failed to load the saved draw list from {:?}", store.dir()))?;
    let Some(config) = config else {
        lottery_info!("No saved draw list in {:?}; starting setup", store.dir());
        return Ok(None);
    };

    if resume {
        match store.session().load() {
            Ok(Some(saved)) => {
                return Ok(Some(Msg::SessionRestored {
                    config,
                    snapshot: saved.snapshot,
                }));
            }
            Ok(None) => lottery_warn!("--resume given but no saved session exists"),
            Err(err) => lottery_warn!("Saved session unreadable, starting fresh: {}", err),
        }
    }
    Ok(Some(Msg::ConfigLoaded(config)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lottery_core::{DrawDefinition, DrawSession, DrawSessionConfig};
    use tempfile::TempDir;

    fn config() -> DrawSessionConfig {
        DrawSessionConfig::new(
            vec!["A".into(), "B".into()],
            vec![DrawDefinition::new("T", 1, 0)],
        )
        .unwrap()
    }

    #[test]
    fn empty_store_starts_setup() {
        let temp = TempDir::new().unwrap();
        assert_eq!(startup_msg(&Store::new(temp.path()), true).unwrap(), None);
    }

    #[test]
    fn saved_config_starts_fresh_unless_resuming() {
        let temp = TempDir::new().unwrap();
        let store = Store::new(temp.path());
        store.config().save(&config()).unwrap();
        let snapshot = DrawSession::new(config()).snapshot();
        store.session().save(&snapshot).unwrap();

        assert_eq!(
            startup_msg(&store, false).unwrap(),
            Some(Msg::ConfigLoaded(config()))
        );
        assert_eq!(
            startup_msg(&store, true).unwrap(),
            Some(Msg::SessionRestored {
                config: config(),
                snapshot,
            })
        );
    }

    #[test]
    fn corrupt_record_is_reported() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(lottery_store::CONFIG_FILENAME), "{").unwrap();
        assert!(startup_msg(&Store::new(temp.path()), false).is_err());
    }
}
