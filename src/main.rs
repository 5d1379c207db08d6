use anyhow::Result;
use clap::Parser;
use enc_classifier::{
    Classifier, ConnectionSettings, EntityKind, NodeRequest, commands, names::split_names,
};
use std::path::PathBuf;

/// enc-classifier - External Node Classifier client
///
/// Lists, finds and registers nodes, classes and groups in an ENC registry.
///
/// Connection options may come from flags, the matching ENC_* environment
/// variables, or a JSON config file (keys enc_server, enc_port, enc_ssl,
/// enc_auth_user, enc_auth_passwd, enc_verify_tls, enc_timeout).
///
/// Examples:
///   enc-classifier --server puppet --port 443 --ssl true list nodes
///   enc-classifier create-node web01 --classes ntp,nginx --groups prod --param role=web
#[derive(Parser, Debug)]
#[command(author, version = env!("ENC_CLASSIFIER_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    connection: ConnectionArgs,
}

#[derive(clap::Args, Debug)]
struct ConnectionArgs {
    /// JSON config file (defaults to <config dir>/enc-classifier/config.json when present)
    #[arg(long, env = "ENC_CONFIG", value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Registry hostname
    #[arg(long, env = "ENC_SERVER", value_name = "HOST", global = true)]
    server: Option<String>,

    /// Registry port
    #[arg(long, env = "ENC_PORT", value_name = "PORT", global = true)]
    port: Option<u16>,

    /// Use HTTPS
    #[arg(long, env = "ENC_SSL", value_name = "BOOL", global = true)]
    ssl: Option<bool>,

    /// Basic-auth user
    #[arg(long, env = "ENC_AUTH_USER", value_name = "USER", global = true)]
    user: Option<String>,

    /// Basic-auth password
    #[arg(
        long,
        env = "ENC_AUTH_PASSWD",
        value_name = "PASSWORD",
        hide_env_values = true,
        global = true
    )]
    password: Option<String>,

    /// Verify the server certificate over HTTPS
    #[arg(long, env = "ENC_VERIFY_TLS", value_name = "BOOL", global = true)]
    verify_tls: Option<bool>,

    /// Request timeout in seconds
    #[arg(long, env = "ENC_TIMEOUT", value_name = "SECS", global = true)]
    timeout: Option<u64>,
}

impl ConnectionArgs {
    fn settings(&self) -> ConnectionSettings {
        ConnectionSettings {
            server: self.server.clone(),
            port: self.port,
            use_ssl: self.ssl,
            auth_user: self.user.clone(),
            auth_passwd: self.password.clone(),
            verify_tls: self.verify_tls,
            timeout_secs: self.timeout,
        }
    }
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// List nodes, classes or groups
    List {
        #[arg(value_name = "KIND")]
        kind: EntityKind,
    },

    /// Show a node, class or group by name
    Find {
        #[arg(value_name = "KIND")]
        kind: EntityKind,
        name: String,
    },

    /// Register a node class
    CreateClass { name: String },

    /// Register a node, creating missing classes
    CreateNode(CreateNodeArgs),
}

#[derive(clap::Args, Debug)]
struct CreateNodeArgs {
    name: String,

    /// Comma-separated class names; missing classes are created
    #[arg(long, value_name = "A,B")]
    classes: Option<String>,

    /// Comma-separated group names; every group must already exist
    #[arg(long, value_name = "A,B")]
    groups: Option<String>,

    /// Node parameter, may be repeated
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = commands::parse_parameter)]
    params: Vec<(String, String)>,
}

impl CreateNodeArgs {
    fn request(self) -> NodeRequest {
        NodeRequest {
            name: self.name,
            classes: self.classes.as_deref().map(split_names).unwrap_or_default(),
            parameters: self.params.into_iter().collect(),
            groups: self.groups.as_deref().map(split_names).unwrap_or_default(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let file_settings = ConnectionSettings::load_or_default(cli.connection.config.as_deref())?;
    let options = cli.connection.settings().merge(file_settings).resolve()?;
    let classifier = Classifier::connect(&options)?;
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::List { kind } => commands::list(&classifier, kind, &mut out).await?,
        Commands::Find { kind, name } => {
            commands::find(&classifier, kind, &name, &mut out).await?
        }
        Commands::CreateClass { name } => {
            commands::create_class(&classifier, &name, &mut out).await?
        }
        Commands::CreateNode(args) => {
            commands::create_node(&classifier, &args.request(), &mut out).await?
        }
    }
    Ok(())
}
