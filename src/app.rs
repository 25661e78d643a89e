//! Application container for code-nav

use crate::cli::OutputContext;
use crate::error::CodeNavResult;
use crate::models::config::CodeNavConfig;
use crate::plugin::{HttpTransport, PluginClient, PluginTarget, Transport};

pub struct App {
    pub(crate) plugin: PluginClient,
    pub(crate) output: OutputContext,
}

impl App {
    /// Build the app against the real plugin listener described by `config`
    pub fn new(config: &CodeNavConfig) -> CodeNavResult<Self> {
        let target = PluginTarget::from(&config.plugin);

        tracing::debug!(
            "Plugin target {} (timeout {:?})",
            target.base_url(),
            target.timeout()
        );

        let transport = HttpTransport::new(target)?;
        Ok(Self::with_transport(
            Box::new(transport),
            OutputContext::from(&config.output),
        ))
    }

    pub fn with_transport(transport: Box<dyn Transport>, output: OutputContext) -> Self {
        Self {
            plugin: PluginClient::new(transport),
            output,
        }
    }

    pub fn output(&self) -> &OutputContext {
        &self.output
    }
}
