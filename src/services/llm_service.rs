//! LLM 服务 - 业务能力层
//!
//! 只负责"发一次对话请求、拿回文本"，不关心题目和工作表。
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型（兼容 OpenAI API 的服务均可）

use anyhow::Result;
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::Config;

/// 一次对话请求
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub system_message: String,
    pub user_message: String,
    pub max_tokens: u32,
    /// `None` 表示使用服务端默认温度
    pub temperature: Option<f32>,
}

/// 对话后端
///
/// 补全流程只依赖这个 trait，测试中可以换成脚本化的实现。
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> Result<String>;
}

/// 基于 async-openai 的 LLM 服务
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        Self {
            client: Client::with_config(openai_config),
            model_name: config.llm_model_name.clone(),
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[async_trait]
impl ChatBackend for LlmService {
    async fn complete(&self, request: &ChatRequest) -> Result<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", request.user_message.len());

        let system_msg = ChatCompletionRequestSystemMessageArgs::default()
            .content(request.system_message.as_str())
            .build()?;
        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(request.user_message.as_str())
            .build()?;

        let mut builder = CreateChatCompletionRequestArgs::default();
        builder
            .model(&self.model_name)
            .messages(vec![
                ChatCompletionRequestMessage::System(system_msg),
                ChatCompletionRequestMessage::User(user_msg),
            ])
            .max_tokens(request.max_tokens);
        if let Some(temperature) = request.temperature {
            builder.temperature(temperature);
        }
        let chat_request = builder.build()?;

        let response = self.client.chat().create(chat_request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            anyhow::anyhow!("LLM API 调用失败: {}", e)
        })?;

        debug!("LLM API 调用成功");

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| anyhow::anyhow!("LLM 返回内容为空"))?;

        Ok(content.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 测试 LLM API 连接性
    ///
    /// 运行方式：
    /// ```bash
    /// OPENAI_API_KEY=... cargo test test_llm_api_connectivity -- --ignored --nocapture
    /// ```
    #[tokio::test]
    #[ignore]
    async fn test_llm_api_connectivity() {
        let _ = tracing_subscriber::fmt::try_init();

        let service = LlmService::new(&Config::from_env());
        let request = ChatRequest {
            system_message: "You are a concise assistant.".to_string(),
            user_message: "Reply with the single word: ok".to_string(),
            max_tokens: 10,
            temperature: Some(0.0),
        };

        match service.complete(&request).await {
            Ok(response) => {
                println!("LLM 响应: {}", response);
                assert!(!response.is_empty());
            }
            Err(e) => panic!("LLM API 测试失败: {}", e),
        }
    }
}
