//! Azure OpenAI LLM provider

use async_trait::async_trait;
use std::env;

use super::{openai::OpenAiProvider, CompletionRequest, CompletionResponse, LlmProvider};
use crate::agents::config::LlmProviderConfig;
use crate::agents::error::{LlmError, LlmResult};

/// Azure OpenAI LLM provider.
///
/// Uses the same API format as OpenAI but with Azure-specific deployment
/// endpoints:
/// `https://{resource}.openai.azure.com/openai/deployments/{deployment}`.
pub struct AzureOpenAiProvider {
    inner: OpenAiProvider,
}

impl AzureOpenAiProvider {
    /// Create a new Azure OpenAI provider from configuration
    pub fn new(config: &LlmProviderConfig) -> LlmResult<Self> {
        let env_var = config
            .api_key_env
            .as_deref()
            .unwrap_or("AZURE_OPENAI_API_KEY");
        let api_key = env::var(env_var).map_err(|_| {
            LlmError::Authentication(format!("Environment variable {} not set", env_var))
        })?;

        let base_url = config.base_url.clone().ok_or_else(|| {
            LlmError::InvalidRequest(
                "Azure OpenAI requires base_url to be set (e.g., \
                 https://your-resource.openai.azure.com)"
                    .to_string(),
            )
        })?;

        // The model field holds the Azure deployment name
        let deployment_url = format!(
            "{}/openai/deployments/{}",
            base_url.trim_end_matches('/'),
            config.model
        );

        let inner = OpenAiProvider::with_key(config, api_key, deployment_url);

        Ok(Self { inner })
    }
}

#[async_trait]
impl LlmProvider for AzureOpenAiProvider {
    fn name(&self) -> &str {
        "azure-openai"
    }

    fn model(&self) -> &str {
        self.inner.model()
    }

    async fn complete(&self, request: CompletionRequest) -> LlmResult<CompletionResponse> {
        // Azure uses the same request format as OpenAI
        self.inner.complete(request).await
    }
}
