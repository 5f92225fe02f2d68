use crate::classify::{domain_of, extension_of};
use crate::command::{Command, Kind};
use crate::launcher::launch;
use crate::registry::Registry;
use crate::store::ConfigFile;
use anyhow::Result;
use tracing::info;

pub fn run(cfg: &ConfigFile, kind: Kind, input: &str) -> Result<()> {
    let registry = cfg.load()?;
    let command = pick(&registry, kind, input)?;
    println!("{}", command.invocation(input).join(" "));
    launch(command, input)?;
    Ok(())
}

/// Resolve by classifier, or go straight to the default when none can be derived.
pub fn pick<'r>(registry: &'r Registry, kind: Kind, input: &str) -> Result<&'r Command> {
    let classifier = match kind {
        Kind::FileEditor => extension_of(input),
        Kind::UrlOpener => domain_of(input),
    };
    let command = match classifier {
        Some(c) => registry.resolve(kind, &c)?,
        None => {
            info!(%kind, input, "no classifier in input; using default");
            registry.resolve_default(kind)?
        }
    };
    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegistryError;
    use crate::registry::CommandSpec;

    fn registry() -> Registry {
        let mut r = Registry::default();
        for (kind, name, classes) in [
            (Kind::FileEditor, "nano", vec!["txt".to_string(), "md".to_string()]),
            (Kind::FileEditor, "vi", vec![]),
            (Kind::UrlOpener, "ytdl", vec!["youtu.be".to_string()]),
            (Kind::UrlOpener, "termux-open-url", vec![]),
        ] {
            r.add(
                kind,
                CommandSpec {
                    executable: name.to_string(),
                    classes,
                    ..Default::default()
                },
            )
            .unwrap();
        }
        r
    }

    #[test]
    fn picks_by_extension_and_domain() {
        let r = registry();
        assert_eq!(pick(&r, Kind::FileEditor, "/sdcard/README.MD").unwrap().name, "nano");
        assert_eq!(pick(&r, Kind::FileEditor, "photo.png").unwrap().name, "vi");
        assert_eq!(pick(&r, Kind::UrlOpener, "https://youtu.be/abc").unwrap().name, "ytdl");
        assert_eq!(pick(&r, Kind::UrlOpener, "https://example.org").unwrap().name, "termux-open-url");
    }

    #[test]
    fn underivable_input_goes_to_default() {
        let r = registry();
        assert_eq!(pick(&r, Kind::FileEditor, "Makefile").unwrap().name, "vi");
        assert_eq!(pick(&r, Kind::UrlOpener, "plain shared text").unwrap().name, "termux-open-url");
    }

    #[test]
    fn underivable_input_without_default_is_incomplete() {
        let mut r = registry();
        r.remove(Kind::UrlOpener, "default").unwrap();
        let err = pick(&r, Kind::UrlOpener, "not a url").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RegistryError>(),
            Some(RegistryError::ConfigurationIncomplete { kind: Kind::UrlOpener })
        ));
    }
}
