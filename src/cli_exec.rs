use anyhow::{Context, Result};

use realmdeck::model::{BackendConfig, SERVICES, known_service};
use realmdeck::remote::{RemoteClient, UnlockOutcome};
use realmdeck::store::ConsoleStore;

use crate::cli_runtime::{require_backend, require_store};
use crate::cli_subcommands::{CampaignCommands, EnvCommands};
use crate::Commands;

pub(crate) fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::Init { force, path } => {
            let root = match path {
                Some(p) => p,
                None => std::env::current_dir().context("get current dir")?,
            };
            ConsoleStore::init(&root, force)?;
            println!("Initialized realmdeck console at {}", root.display());
        }

        Commands::Connect { url, interval } => {
            let store = require_store()?;
            store.set_backend(BackendConfig {
                base_url: url.clone(),
                poll_interval_secs: interval,
            })?;
            // Probe immediately so a typo'd URL fails loudly here.
            let client = RemoteClient::new(&url)?;
            match client.ping() {
                Ok(()) => println!("Connected to {}", url),
                Err(err) => println!("Saved {} (backend not reachable yet: {:#})", url, err),
            }
        }

        Commands::Status { json } => {
            let client = client()?;
            let reachable = client.ping().is_ok();
            let auth = if reachable {
                client.auth_status().unwrap_or(None)
            } else {
                None
            };
            let config = if reachable {
                client.fetch_config().ok()
            } else {
                None
            };

            if json {
                let out = serde_json::json!({
                    "backend": client.base_url(),
                    "reachable": reachable,
                    "auth": auth,
                    "active_campaign": config.as_ref().map(|c| c.active_campaign.clone()),
                    "llm_provider": config.as_ref().map(|c| c.llm_provider.clone()),
                });
                println!("{}", serde_json::to_string_pretty(&out).context("serialize status")?);
            } else {
                println!("backend: {}", client.base_url());
                println!("status: {}", if reachable { "online" } else { "offline" });
                match auth {
                    Some(a) => println!(
                        "auth: has_pin={} locked={}",
                        a.has_pin, a.locked
                    ),
                    None => println!("auth: not deployed"),
                }
                if let Some(c) = config {
                    println!("campaign: {}", c.active_campaign);
                    println!("llm: {}", c.llm_provider);
                }
            }
        }

        Commands::Audio { json } => {
            let client = client()?;
            let config = client.fetch_config()?;
            let registry = config.audio_registry;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&registry).context("serialize audio registry")?
                );
            } else {
                println!("narrator: {} (voice: {})", registry.dm_name, registry.dm_voice);
                for a in &registry.archetypes {
                    println!("trigger  {: <24} voice={}", a.label, a.voice_id);
                }
                for s in &registry.soundscapes {
                    println!("scape    {: <24} track={}", s.label, s.track_id);
                }
            }
        }

        Commands::Env { command } => handle_env(command)?,
        Commands::Campaigns { command } => handle_campaigns(command)?,

        Commands::Logs { service } => {
            anyhow::ensure!(known_service(&service), "unknown service: {}", service);
            let client = client()?;
            print!("{}", client.service_logs(&service)?);
        }

        Commands::Restart { service, yes } => {
            let client = client()?;
            if service == "stack" || service == "all" {
                anyhow::ensure!(
                    yes,
                    "restarting the whole stack needs --yes (every service goes down briefly)"
                );
                for s in SERVICES {
                    match client.restart_service(s.id) {
                        Ok(()) => println!("{} restart triggered", s.id),
                        Err(err) => eprintln!("{} failed: {:#}", s.id, err),
                    }
                }
            } else {
                anyhow::ensure!(known_service(&service), "unknown service: {}", service);
                client.restart_service(&service)?;
                println!("{} restart triggered", service);
            }
        }

        Commands::Lock => {
            let client = client()?;
            let status = client.lock()?;
            println!("locked={} has_pin={}", status.locked, status.has_pin);
        }

        Commands::Unlock { pin } => {
            let client = client()?;
            match client.unlock(&pin)? {
                UnlockOutcome::Granted(status) => {
                    println!("unlocked (locked={})", status.locked);
                }
                UnlockOutcome::Denied => anyhow::bail!("access denied"),
            }
        }

        Commands::Roll { spec, json } => {
            let spec: realmdeck::dice::RollSpec = spec.parse()?;
            let result = realmdeck::dice::roll(spec)?;
            if json {
                let out = serde_json::json!({
                    "spec": result.spec.to_string(),
                    "rolls": result.rolls,
                    "total": result.total,
                });
                println!("{}", serde_json::to_string_pretty(&out).context("serialize roll")?);
            } else {
                println!("{} -> {} {:?}", result.spec, result.total, result.rolls);
            }
        }
    }

    Ok(())
}

fn client() -> Result<RemoteClient> {
    let store = require_store()?;
    let backend = require_backend(&store)?;
    RemoteClient::new(backend.base_url)
}

fn handle_env(command: EnvCommands) -> Result<()> {
    let client = client()?;
    match command {
        EnvCommands::List { json } => {
            let vars = client.env_all()?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&vars).context("serialize env vars")?
                );
            } else {
                for v in vars {
                    println!("{}={}", v.key, v.value);
                }
            }
        }
        EnvCommands::Set { key, value } => {
            let key = key.to_ascii_uppercase();
            client.env_set(&key, &value)?;
            println!("{} updated", key);
        }
        EnvCommands::Unset { key, yes } => {
            // Headless: destructive without a confirm dialog needs --yes.
            anyhow::ensure!(yes, "deleting {} needs --yes (cannot be undone)", key);
            client.env_delete(&key)?;
            println!("{} deleted", key);
        }
    }
    Ok(())
}

fn handle_campaigns(command: CampaignCommands) -> Result<()> {
    let client = client()?;
    match command {
        CampaignCommands::List { json } => {
            let campaigns = client.list_campaigns()?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&campaigns).context("serialize campaigns")?
                );
            } else {
                let active = client
                    .fetch_config()
                    .map(|c| c.active_campaign)
                    .unwrap_or_default();
                for c in campaigns {
                    let marker = if c.id == active { "*" } else { " " };
                    println!("{} {: <28} {}", marker, c.id, c.name);
                }
            }
        }
        CampaignCommands::Use { id } => {
            client.activate_campaign(&id)?;
            println!("campaign switched to {}", id);
        }
        CampaignCommands::Delete { id, yes } => {
            anyhow::ensure!(yes, "deleting {} needs --yes (cannot be undone)", id);
            let active = client
                .fetch_config()
                .map(|c| c.active_campaign)
                .unwrap_or_default();
            anyhow::ensure!(id != active, "cannot delete the active campaign");
            client.delete_campaign(&id)?;
            println!("campaign {} deleted", id);
        }
    }
    Ok(())
}
