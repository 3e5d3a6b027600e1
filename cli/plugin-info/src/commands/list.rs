use std::fmt::Write;

use anyhow::{Context, Result};
use bpaf::Bpaf;
use plugin_catalog::{ExtensionType, PluginInfo, PluginInfoClient, PluginInfoQuery, PluginState};
use tracing::{debug, instrument};

use crate::utils::message;

/// Whether plugins that failed to load are listed
#[derive(Debug, Bpaf, Clone, Copy, PartialEq, Eq)]
pub enum BadPlugins {
    /// Also list plugins that failed to load
    #[bpaf(long("include-bad"))]
    Include,
    /// Only list plugins that loaded successfully
    #[bpaf(long("exclude-bad"))]
    Exclude,
}

#[derive(Debug, Bpaf, Clone)]
pub struct List {
    #[bpaf(external(bad_plugins), optional)]
    pub bad_plugins: Option<BadPlugins>,

    /// Only list plugins implementing this extension type
    ///
    /// ex. authorization, elastic-agent, scm, task
    #[bpaf(long("type"), argument("TYPE"))]
    pub extension_type: Option<ExtensionType>,

    /// Display plugins as a JSON array
    #[bpaf(long)]
    pub json: bool,
}

impl List {
    #[instrument(name = "list", fields(bad_plugins = ?self.bad_plugins, json = self.json), skip_all)]
    pub async fn handle(self, client: &PluginInfoClient) -> Result<()> {
        let query = self.query();
        debug!(?query, "listing plugins");

        let plugins = client
            .list(&query)
            .await
            .with_context(|| format!("failed to list plugins of '{}'", client.server_url()))?;

        if self.json {
            println!("{}", render_json(&plugins)?);
            return Ok(());
        }

        if plugins.is_empty() {
            message::plain("No plugins found.");
            return Ok(());
        }

        print!("{}", render_plugins(&plugins));
        Ok(())
    }

    /// Without `--include-bad` or `--exclude-bad` the server default applies.
    fn query(&self) -> PluginInfoQuery {
        PluginInfoQuery {
            include_bad: self.bad_plugins.map(|bad| bad == BadPlugins::Include),
            extension_type: self.extension_type.clone(),
        }
    }
}

fn state_label(state: PluginState) -> &'static str {
    match state {
        PluginState::Active => "active",
        PluginState::Invalid => "invalid",
        PluginState::Unknown => "unknown",
    }
}

/// Render plugins as aligned columns of id, version, state and extension types.
fn render_plugins(plugins: &[PluginInfo]) -> String {
    let rows = plugins
        .iter()
        .map(|plugin| {
            let extensions = plugin
                .extension_types()
                .map(ExtensionType::as_str)
                .collect::<Vec<_>>()
                .join(",");
            [
                plugin.id.clone(),
                plugin.version().unwrap_or("-").to_string(),
                state_label(plugin.status.state).to_string(),
                extensions,
            ]
        })
        .collect::<Vec<_>>();

    let id_width = rows.iter().map(|row| row[0].len()).max().unwrap_or(0);
    let version_width = rows.iter().map(|row| row[1].len()).max().unwrap_or(0);
    let state_width = rows.iter().map(|row| row[2].len()).max().unwrap_or(0);

    let mut out = String::new();
    for [id, version, state, extensions] in rows {
        writeln!(
            out,
            "{id:id_width$}  {version:version_width$}  {state:state_width$}  {extensions}"
        )
        .unwrap();
    }
    out
}

fn render_json(plugins: &[PluginInfo]) -> Result<String> {
    serde_json::to_string_pretty(plugins).context("failed to serialize plugins")
}

#[cfg(test)]
mod tests {
    use plugin_catalog::{Links, MockClient};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use url::Url;

    use super::*;

    fn plugin(id: &str, version: Option<&str>, state: &str, types: &[&str]) -> PluginInfo {
        let extensions = types
            .iter()
            .map(|t| json!({ "type": t }))
            .collect::<Vec<_>>();
        PluginInfo::from_json(
            json!({
                "id": id,
                "status": { "state": state },
                "about": { "version": version },
                "extensions": extensions,
            }),
            &Links::new(),
        )
        .unwrap()
    }

    #[test]
    fn query_leaves_unset_flags_absent() {
        let list = List {
            bad_plugins: None,
            extension_type: None,
            json: false,
        };
        assert_eq!(list.query(), PluginInfoQuery::default());

        let list = List {
            bad_plugins: Some(BadPlugins::Exclude),
            extension_type: None,
            json: false,
        };
        assert_eq!(list.query(), PluginInfoQuery {
            include_bad: Some(false),
            extension_type: None,
        });

        let list = List {
            bad_plugins: Some(BadPlugins::Include),
            extension_type: Some(ExtensionType::Scm),
            json: true,
        };
        assert_eq!(list.query(), PluginInfoQuery {
            include_bad: Some(true),
            extension_type: Some(ExtensionType::Scm),
        });
    }

    #[test]
    fn renders_aligned_columns() {
        let plugins = vec![
            plugin("cd.go.authorization.ldap", Some("2.2.0"), "active", &[
                "authorization",
            ]),
            plugin("yum", None, "invalid", &[]),
            plugin("cd.go.contrib.elastic-agent.docker", Some("3.1.0-1"), "active", &[
                "elastic-agent",
                "analytics",
            ]),
        ];

        let expected = [
            "cd.go.authorization.ldap            2.2.0    active   authorization\n",
            "yum                                 -        invalid  \n",
            "cd.go.contrib.elastic-agent.docker  3.1.0-1  active   elastic-agent,analytics\n",
        ]
        .concat();

        assert_eq!(render_plugins(&plugins), expected);
    }

    #[tokio::test]
    async fn handle_sends_filters_to_server() {
        let mock = MockClient::default();
        mock.push_json_response(json!({ "_embedded": { "plugin_info": [] } }));
        let client = PluginInfoClient::with_transport(
            Url::parse("https://ci.example.com").unwrap(),
            mock.clone(),
        );

        let list = List {
            bad_plugins: Some(BadPlugins::Include),
            extension_type: Some(ExtensionType::Task),
            json: false,
        };
        list.handle(&client).await.unwrap();

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url.query(), Some("include_bad=true&type=task"));
    }

    #[tokio::test]
    async fn handle_reports_server_in_error() {
        let client = PluginInfoClient::with_transport(
            Url::parse("https://ci.example.com").unwrap(),
            MockClient::default(),
        );

        let list = List {
            bad_plugins: None,
            extension_type: None,
            json: true,
        };
        let err = list.handle(&client).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "failed to list plugins of 'https://ci.example.com/'"
        );
    }

    #[tokio::test]
    async fn json_output_carries_links_and_extensions() {
        let mock = MockClient::default();
        mock.push_json_response(json!({
            "_links": { "self": { "href": "https://ci.example.com/go/api/admin/plugin_info" } },
            "_embedded": { "plugin_info": [{
                "id": "cd.go.authorization.ldap",
                "status": { "state": "active" },
                "about": { "version": "2.2.0" },
                "extensions": [{ "type": "authorization", "capabilities": { "can_search": true } }]
            }] }
        }));
        let client = PluginInfoClient::with_transport(
            Url::parse("https://ci.example.com").unwrap(),
            mock,
        );

        let plugins = client.list(&PluginInfoQuery::default()).await.unwrap();
        let rendered: serde_json::Value =
            serde_json::from_str(&render_json(&plugins).unwrap()).unwrap();

        let plugin = &rendered[0];
        assert_eq!(plugin["id"], "cd.go.authorization.ldap");
        assert_eq!(
            plugin["_links"]["self"]["href"],
            "https://ci.example.com/go/api/admin/plugin_info"
        );
        assert_eq!(plugin["extensions"], json!([{
            "type": "authorization",
            "capabilities": { "can_search": true }
        }]));
    }

    #[tokio::test]
    async fn handle_succeeds_with_json_output() {
        let mock = MockClient::default();
        mock.push_json_response(json!({ "_embedded": { "plugin_info": [
            { "id": "yum", "status": { "state": "invalid" } }
        ] } }));
        let client = PluginInfoClient::with_transport(
            Url::parse("https://ci.example.com").unwrap(),
            mock,
        );

        let list = List {
            bad_plugins: Some(BadPlugins::Include),
            extension_type: None,
            json: true,
        };
        list.handle(&client).await.unwrap();
    }
}
