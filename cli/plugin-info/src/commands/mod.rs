mod list;

use anyhow::Result;
use bpaf::Bpaf;
use indoc::indoc;
use tracing::debug;
use url::Url;

pub use self::list::List;
use self::list::list;
use crate::config::Config;
use crate::utils::init::init_client;

static DESCRIPTION: &'_ str = indoc! {"
    Inspect the plugins installed on a GoCD server.\n\n

    Connection settings are read from 'plugin-info.toml' in the configuration directory
    and from 'PLUGIN_INFO_*' environment variables."
};

fn vec_len<T>(x: Vec<T>) -> usize {
    Vec::len(&x)
}

#[derive(Bpaf, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verbosity {
    Verbose(
        /// Increase logging verbosity
        ///
        /// Invoke multiple times for increasing detail.
        #[bpaf(short('v'), long("verbose"), req_flag(()), many, map(vec_len))]
        usize,
    ),

    /// Silence logs except for errors
    #[bpaf(short, long)]
    Quiet,
}

impl Default for Verbosity {
    fn default() -> Self {
        Verbosity::Verbose(0)
    }
}

#[derive(Bpaf)]
#[bpaf(options, version, descr(DESCRIPTION))]
pub struct PluginInfoCli(#[bpaf(external(plugin_info_args))] pub PluginInfoArgs);

/// Main args parser
///
/// To parse the full command line, use [`PluginInfoCli`] through [`plugin_info_cli()`].
#[derive(Debug, Bpaf)]
#[bpaf(ignore_rustdoc)]
pub struct PluginInfoArgs {
    /// Verbose mode
    ///
    /// Invoke multiple times for increasing detail.
    #[bpaf(external, fallback(Default::default()))]
    pub verbosity: Verbosity,

    /// Base URL of the server, overrides the configured 'server_url'
    #[bpaf(long, argument("URL"))]
    pub server_url: Option<Url>,

    #[bpaf(external(commands))]
    command: Commands,
}

impl PluginInfoArgs {
    pub async fn handle(self, mut config: Config) -> Result<()> {
        if let Some(server_url) = self.server_url {
            debug!(%server_url, "server URL set on the command line");
            config.server_url = server_url;
        }

        let client = init_client(&config)?;

        match self.command {
            Commands::List(args) => args.handle(&client).await,
        }
    }
}

#[derive(Debug, Bpaf, Clone)]
enum Commands {
    /// List the plugins installed on the server
    #[bpaf(command)]
    List(#[bpaf(external(list))] List),
}
