//! Filters for the plugin info listing and the URL they encode to.

use url::Url;

use crate::types::ExtensionType;

/// Path of the plugin info listing below the server's base URL.
pub const PLUGIN_INFO_PATH: &str = "go/api/admin/plugin_info";

/// Restrictions on which plugins to list.
///
/// Absent fields do not restrict the listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginInfoQuery {
    /// Also list plugins that failed to load.
    pub include_bad: Option<bool>,
    /// Only list plugins implementing this extension type.
    pub extension_type: Option<ExtensionType>,
}

impl PluginInfoQuery {
    /// Query parameters in request order.
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(include_bad) = self.include_bad {
            params.push(("include_bad", include_bad.to_string()));
        }
        if let Some(extension_type) = &self.extension_type {
            params.push(("type", extension_type.to_string()));
        }
        params
    }
}

/// Build the listing URL for `query` relative to the server's `base` URL.
///
/// The listing path is appended to the path of `base`, so servers mounted
/// below a prefix (e.g. behind a reverse proxy) keep that prefix.
/// A query without restrictions yields a URL without a query component.
pub fn plugin_info_url(base: &Url, query: &PluginInfoQuery) -> Result<Url, url::ParseError> {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
        .pop_if_empty()
        .extend(PLUGIN_INFO_PATH.split('/'));

    let params = query.params();
    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params);
    }

    Ok(url)
}
