use anyhow::{Context, Result};
use authserver_oauth::ProvidersSecret;
use authserver_registry::{nats::DEFAULT_MESSAGING_PORT, Subjects};
use authserver_tokens::RsaKeyPair;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::net::{IpAddr, SocketAddr};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "authserver")]
#[command(version, about = "oauth server that provides endpoints for managing authentication")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the auth server
    Run(RunArgs),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Providers secret file (JSON)
    #[arg(short, long, env = "OAUTH_CONFIG")]
    pub config: PathBuf,

    /// Public key file for verifying jwt
    #[arg(long, env = "JWT_PUBLIC_KEY")]
    pub public_key: PathBuf,

    /// Private key file for signing jwt
    #[arg(long, env = "JWT_PRIVATE_KEY")]
    pub private_key: PathBuf,

    /// NATS host of the identity registry
    #[arg(long, env = "MESSAGING_HOST")]
    pub messaging_host: Option<String>,

    /// NATS port of the identity registry
    #[arg(long, env = "MESSAGING_PORT", default_value_t = DEFAULT_MESSAGING_PORT)]
    pub messaging_port: u16,

    /// Base URL of an HTTP identity registry, used when no messaging host is set
    #[arg(long, env = "REGISTRY_URL")]
    pub registry_url: Option<String>,

    /// Server port
    #[arg(short, long, default_value_t = 9999)]
    pub port: u16,

    /// Address to bind the server to
    #[arg(long, default_value = "0.0.0.0")]
    pub bind: IpAddr,

    /// Deadline for each registry round trip
    #[arg(long, default_value_t = 10)]
    pub registry_timeout_secs: u64,

    /// Deadline for each call to an identity provider
    #[arg(long, default_value_t = 30)]
    pub provider_timeout_secs: u64,

    /// Issuer written into and required from login tokens
    #[arg(long, default_value = "dictyBase")]
    pub issuer: String,

    #[arg(long, default_value = "IdentityService.GetIdentity")]
    pub identity_subject: String,

    #[arg(long, default_value = "UserService.Exist")]
    pub user_exists_subject: String,

    #[arg(long, default_value = "UserService.Get")]
    pub user_get_subject: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Also write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// How the identity registry is reached
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryTransport {
    Nats { host: String, port: u16 },
    Http { url: String },
}

impl RegistryTransport {
    fn from_args(args: &RunArgs) -> Result<Self> {
        match (&args.messaging_host, &args.registry_url) {
            (Some(host), _) => Ok(RegistryTransport::Nats {
                host: host.clone(),
                port: args.messaging_port,
            }),
            (None, Some(url)) => Ok(RegistryTransport::Http { url: url.clone() }),
            (None, None) => anyhow::bail!("either --messaging-host or --registry-url is required"),
        }
    }
}

impl fmt::Display for RegistryTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryTransport::Nats { host, port } => write!(f, "nats://{}:{}", host, port),
            RegistryTransport::Http { url } => f.write_str(url),
        }
    }
}

/// Server configuration, loaded once at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub providers_secret: ProvidersSecret,
    pub keys: RsaKeyPair,
    pub issuer: String,
    pub registry: RegistryTransport,
    pub subjects: Subjects,
    pub registry_timeout: Duration,
    pub provider_timeout: Duration,
}

impl Config {
    pub fn from_args(args: &RunArgs) -> Result<Self> {
        let providers_secret = read_secret_config(&args.config)?;
        let keys = RsaKeyPair::load(&args.private_key, &args.public_key)
            .context("unable to parse keys")?;

        Ok(Config {
            bind_address: SocketAddr::new(args.bind, args.port),
            providers_secret,
            keys,
            issuer: args.issuer.clone(),
            registry: RegistryTransport::from_args(args)?,
            subjects: Subjects {
                identity_exists: args.identity_subject.clone(),
                user_exists: args.user_exists_subject.clone(),
                user_get: args.user_get_subject.clone(),
            },
            registry_timeout: Duration::from_secs(args.registry_timeout_secs),
            provider_timeout: Duration::from_secs(args.provider_timeout_secs),
        })
    }
}

/// Read the providers secret file, e.g. `{"google": "xxx", "github": "xxx"}`
pub fn read_secret_config(path: &Path) -> Result<ProvidersSecret> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("unable to read secret config file {}", path.display()))?;
    ProvidersSecret::from_json(&raw)
        .with_context(|| format!("unable to parse secret config file {}", path.display()))
}
