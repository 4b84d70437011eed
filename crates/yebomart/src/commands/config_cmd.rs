//! Config subcommand handlers.

use dialoguer::{Input, Select};
use yebomart_core::{DataSource, ReconcileStrategy};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile, SessionBackend};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn invalid(field: &str, reason: &str) -> CliError {
    CliError::Validation {
        field: field.into(),
        reason: reason.into(),
    }
}

fn available_profiles(cfg: &Config) -> String {
    let mut names: Vec<_> = cfg.profiles.keys().cloned().collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort();
    names.join(", ")
}

fn parse_backend(value: &str) -> Result<SessionBackend, CliError> {
    match value.to_ascii_lowercase().as_str() {
        "file" => Ok(SessionBackend::File),
        "keyring" => Ok(SessionBackend::Keyring),
        "memory" => Ok(SessionBackend::Memory),
        _ => Err(invalid(
            "session_backend",
            "must be 'file', 'keyring' or 'memory'",
        )),
    }
}

/// Apply `key = value` to `profile`.
fn set_key(profile: &mut Profile, key: &str, value: String) -> Result<(), CliError> {
    match key {
        "api_url" | "api-url" => {
            url::Url::parse(&value)
                .map_err(|e| invalid("api_url", &format!("invalid URL '{value}': {e}")))?;
            profile.api_url = value;
        }
        "email" => profile.email = Some(value),
        "data_source" | "data-source" => {
            profile.data_source = Some(
                value
                    .parse::<DataSource>()
                    .map_err(|_| invalid("data_source", "must be 'live', 'demo' or 'auto'"))?,
            );
        }
        "reconcile" => {
            profile.reconcile = Some(value.parse::<ReconcileStrategy>().map_err(|_| {
                invalid("reconcile", "must be 'optimistic' or 'refetch'")
            })?);
        }
        "session_backend" | "session-backend" => profile.session_backend = parse_backend(&value)?,
        "timeout" => {
            profile.timeout = Some(
                value
                    .parse()
                    .map_err(|_| invalid("timeout", "must be a number (seconds)"))?,
            );
        }
        "insecure" => {
            profile.insecure = Some(
                value
                    .parse()
                    .map_err(|_| invalid("insecure", "must be 'true' or 'false'"))?,
            );
        }
        "ca_cert" | "ca-cert" => profile.ca_cert = Some(value.into()),
        other => {
            return Err(invalid(
                other,
                &format!(
                    "unknown config key '{other}'. Valid keys: api_url, email, data_source, \
                     reconcile, session_backend, timeout, insecure, ca_cert"
                ),
            ));
        }
    }
    Ok(())
}

fn init() -> Result<(), CliError> {
    let config_path = config::config_path();
    eprintln!("YeboMart admin CLI: configuration wizard");
    eprintln!("   Config path: {}\n", config_path.display());

    let mut cfg = config::load_config()?;

    let profile_name: String = Input::new()
        .with_prompt("Profile name")
        .default(config::DEFAULT_PROFILE.into())
        .interact_text()
        .map_err(prompt_err)?;

    let api_url: String = Input::new()
        .with_prompt("API URL")
        .default(yebomart_core::DEFAULT_API_URL.into())
        .validate_with(|s: &String| url::Url::parse(s).map(|_| ()).map_err(|e| e.to_string()))
        .interact_text()
        .map_err(prompt_err)?;

    let email: String = Input::new()
        .with_prompt("Admin email (optional)")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;

    let sources = &["auto (backend, demo data as fallback)", "live", "demo"];
    let data_source = match Select::new()
        .with_prompt("Data source")
        .items(sources)
        .default(0)
        .interact()
        .map_err(prompt_err)?
    {
        1 => DataSource::Live,
        2 => DataSource::Demo,
        _ => DataSource::Auto,
    };

    let backends = &["File under the data directory", "System keyring", "Don't keep sessions"];
    let session_backend = match Select::new()
        .with_prompt("Where to keep the login session?")
        .items(backends)
        .default(0)
        .interact()
        .map_err(prompt_err)?
    {
        1 => SessionBackend::Keyring,
        2 => SessionBackend::Memory,
        _ => SessionBackend::File,
    };

    let profile = Profile {
        api_url,
        email: Some(email.trim().to_owned()).filter(|e| !e.is_empty()),
        data_source: Some(data_source),
        session_backend,
        ..Profile::default()
    };
    cfg.profiles.insert(profile_name.clone(), profile);
    if cfg.default_profile.is_none() {
        cfg.default_profile = Some(profile_name.clone());
    }

    let path = config::save_config(&cfg)?;
    eprintln!("\nConfiguration written to {}", path.display());
    eprintln!("  Profile: {profile_name}");
    eprintln!("\n  Next: yebomart login --profile {profile_name}");
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(),

        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let out = output::render_single(
                &global.output,
                &cfg,
                |c| toml::to_string_pretty(c).unwrap_or_else(|e| format!("<unprintable: {e}>")),
                |_| config::config_path().display().to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config()?;
            let profile_name = config::active_profile_name(global, &cfg);
            let profile = cfg.profiles.entry(profile_name.clone()).or_default();
            set_key(profile, &key, value)?;
            config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("Set {key} on profile '{profile_name}'");
            }
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = config::load_config()?;
            let default = cfg
                .default_profile
                .as_deref()
                .unwrap_or(config::DEFAULT_PROFILE);
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: yebomart config init");
                return Ok(());
            }
            let mut names: Vec<_> = cfg.profiles.keys().collect();
            names.sort();
            for name in names {
                let marker = if name == default { " *" } else { "" };
                println!("{name}{marker}");
            }
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config()?;
            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    available: available_profiles(&cfg),
                    name,
                });
            }
            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("Default profile set to '{name}'");
            }
            Ok(())
        }

        ConfigCommand::Path => {
            println!("{}", config::config_path().display());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_key_validates_values() {
        let mut profile = Profile::default();
        assert!(set_key(&mut profile, "data-source", "demo".into()).is_ok());
        assert_eq!(profile.data_source, Some(DataSource::Demo));

        assert!(set_key(&mut profile, "session_backend", "Keyring".into()).is_ok());
        assert_eq!(profile.session_backend, SessionBackend::Keyring);

        assert!(set_key(&mut profile, "timeout", "soon".into()).is_err());
        assert!(set_key(&mut profile, "api_url", "not a url".into()).is_err());
        assert!(set_key(&mut profile, "colour", "red".into()).is_err());
        assert_eq!(profile.timeout, None);
    }
}
