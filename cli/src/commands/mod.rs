//! Built-in commands shipped with the artisan binary
//!
//! Both commands are registered explicitly by `main` (so they always win a
//! name collision) and also submitted to the linked command catalog, which
//! lets a command module refer to them by type name.

mod about;
mod config_publish;

pub use about::AboutCommand;
pub use config_publish::ConfigPublishCommand;

use artisan_application::ExplicitRegistration;
use artisan_domain::{Command, CommandFactory};
use std::path::{Path, PathBuf};

/// Explicit registrations for the built-in commands, bound to `project_root`
pub fn builtin_registrations(project_root: &Path) -> Vec<ExplicitRegistration> {
    vec![
        registration("about", bound(project_root, AboutCommand::new)),
        registration("config:publish", bound(project_root, ConfigPublishCommand::new)),
    ]
}

fn registration(name: &str, factory: CommandFactory) -> ExplicitRegistration {
    ExplicitRegistration::new(factory).named(name)
}

/// Factory constructing `T` for a fixed project root
fn bound<T>(project_root: &Path, construct: fn(PathBuf) -> T) -> CommandFactory
where
    T: Command + 'static,
{
    let root = project_root.to_path_buf();
    CommandFactory::new(std::any::type_name::<T>(), move || Ok(Box::new(construct(root.clone()))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use artisan_application::{ArtisanBuilder, DispatcherPort, NoDiscovery};
    use artisan_domain::CommandCatalog;
    use artisan_infrastructure::FsProjectDetector;
    use artisan_presentation::ClapDispatcher;
    use tempfile::tempdir;

    #[test]
    fn test_builtins_register_under_fixed_names() {
        let dir = tempdir().unwrap();
        let mut builder = ArtisanBuilder::new(FsProjectDetector::new(), NoDiscovery, dir.path());
        for registration in builtin_registrations(dir.path()) {
            builder = builder.add_registration(registration);
        }

        let mut dispatcher = ClapDispatcher::new("artisan");
        let report = builder.build(&mut dispatcher);

        assert_eq!(report.names(), vec!["about", "config:publish"]);
        assert!(report.diagnostics.is_empty());
        assert_eq!(
            report.table.get("about").unwrap().description,
            "Display information about the current project"
        );

        let status = dispatcher
            .dispatch(&["config:publish".to_string()])
            .unwrap();
        assert_eq!(status, 0);
        assert!(dir.path().join("artisan.json").is_file());
    }

    #[test]
    fn test_builtins_are_in_linked_catalog() {
        let catalog = CommandCatalog::linked();
        assert!(catalog.contains("AboutCommand"));
        assert!(catalog.contains("ConfigPublishCommand"));
    }
}
