use tracing::{Instrument, debug, info, info_span, trace, warn};

use crate::domain::{
    common::{
        entities::{app_errors::CoreError, language::Language},
        generate_uuid_v7,
        i18n::{MessageKey, localized},
        services::Service,
    },
    menu::entities::MenuItem,
    recommendation::{
        entities::{ChatReply, RecommendationRecord, ReplySource},
        interpreter::{
            ResolvedDishes, ToolDecision, interpret_json_reply, interpret_recommendation_list,
            interpret_tool_reply,
        },
        ports::{LLMClient, RecommendationService},
        prompt_builder::PromptBuilder,
        value_objects::{
            ChatTurnInput, MAX_RECOMMENDATIONS, RecommendationArgs, ResponseMode,
        },
    },
};

impl<LLM> RecommendationService for Service<LLM>
where
    LLM: LLMClient,
{
    async fn chat_turn(&self, input: ChatTurnInput) -> Result<ChatReply, CoreError> {
        let turn_id = generate_uuid_v7();
        let span = info_span!(
            "chat_turn",
            %turn_id,
            language = %input.language,
            mode = ?self.config.response_mode,
            history = input.conversation_history.len(),
        );

        async move {
            let user_message = input.user_message()?;

            let reply = match self.config.response_mode {
                ResponseMode::StrictJson => self.strict_json_turn(&input, &user_message).await?,
                ResponseMode::ToolCall => self.tool_call_turn(&input, &user_message).await?,
            };

            info!(
                dishes = reply.recommended_dishes.len(),
                source = ?reply.source,
                "chat turn completed"
            );
            Ok(reply)
        }
        .instrument(span)
        .await
    }
}

impl<LLM> Service<LLM>
where
    LLM: LLMClient,
{
    async fn strict_json_turn(
        &self,
        input: &ChatTurnInput,
        user_message: &str,
    ) -> Result<ChatReply, CoreError> {
        let language = input.language;
        let request =
            PromptBuilder::new(&self.menu_catalog, &self.config).build_chat_request(input, user_message);

        let raw = match self.llm_client.complete(request).await {
            Ok(reply) => reply.content().map(str::to_string),
            Err(e) => {
                warn!(error = %e, "model call failed, serving fallback dishes");
                return self.fallback_reply(input, user_message, self.default_count());
            }
        };
        trace!(raw = ?raw, "model reply");

        let interpreted = raw
            .ok_or_else(|| CoreError::MalformedOutput("empty reply".to_string()))
            .and_then(|raw| {
                interpret_json_reply(
                    &raw,
                    &self.menu_catalog,
                    language,
                    usize::from(MAX_RECOMMENDATIONS),
                )
            });

        let interpreted = match interpreted {
            Ok(interpreted) => interpreted,
            Err(e) => {
                warn!(error = %e, "unusable model reply, serving fallback dishes");
                return self.fallback_reply(input, user_message, self.default_count());
            }
        };

        let message = if !interpreted.message.is_empty() {
            interpreted.message
        } else if !interpreted.resolved.is_empty() {
            localized(language, MessageKey::RecommendationIntro).to_string()
        } else {
            localized(language, MessageKey::Confused).to_string()
        };

        Ok(ChatReply {
            message,
            recommended_dishes: interpreted.resolved.dishes,
            recommendations: interpreted.resolved.records,
            option_picks: interpreted.option_picks,
            source: ReplySource::Model,
        })
    }

    async fn tool_call_turn(
        &self,
        input: &ChatTurnInput,
        user_message: &str,
    ) -> Result<ChatReply, CoreError> {
        let language = input.language;
        let builder = PromptBuilder::new(&self.menu_catalog, &self.config);
        let request = builder.build_chat_request(input, user_message);

        let reply = match self.llm_client.complete(request).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "model call failed, serving fallback dishes");
                return self.fallback_reply(input, user_message, self.default_count());
            }
        };

        let args = match interpret_tool_reply(&reply, self.config.default_count) {
            ToolDecision::Recommend(args) => args,
            ToolDecision::Respond(text) => return Ok(ChatReply::text(text)),
            ToolDecision::Nothing => {
                debug!("model returned neither text nor a tool call");
                return Ok(ChatReply::text(localized(language, MessageKey::Confused)));
            }
        };

        info!(count = args.count, "model requested recommendations");
        let fallback_preferences = if args.preferences.is_empty() {
            user_message.to_string()
        } else {
            args.preferences.clone()
        };

        let resolved = match self.generate_recommendations(&builder, &args, language).await {
            Ok(resolved) if !resolved.is_empty() => resolved,
            Ok(_) => {
                warn!("no recommended dish matched the menu, serving fallback dishes");
                return self.fallback_reply(input, &fallback_preferences, usize::from(args.count));
            }
            Err(e) => {
                warn!(error = %e, "recommendation generation failed, serving fallback dishes");
                return self.fallback_reply(input, &fallback_preferences, usize::from(args.count));
            }
        };

        let intro = builder.build_intro_request(&args, &resolved.dishes, language);
        let message = match self.llm_client.complete(intro).await {
            Ok(reply) => reply.content().map(str::to_string),
            Err(e) => {
                warn!(error = %e, "intro call failed, using the default intro");
                None
            }
        }
        .unwrap_or_else(|| localized(language, MessageKey::RecommendationIntro).to_string());

        Ok(ChatReply {
            message,
            recommended_dishes: resolved.dishes,
            recommendations: resolved.records,
            option_picks: Vec::new(),
            source: ReplySource::Model,
        })
    }

    async fn generate_recommendations(
        &self,
        builder: &PromptBuilder<'_>,
        args: &RecommendationArgs,
        language: Language,
    ) -> Result<ResolvedDishes, CoreError> {
        let request = builder.build_recommendation_request(args, language);
        let reply = self.llm_client.complete(request).await?;
        trace!(raw = ?reply.content, "recommendation list reply");
        let raw = reply
            .content()
            .ok_or_else(|| CoreError::MalformedOutput("empty recommendation list".to_string()))?;

        interpret_recommendation_list(
            raw,
            &self.menu_catalog,
            language,
            usize::from(args.count),
        )
    }

    /// Deterministic picks served when the model path produced nothing usable.
    fn fallback_reply(
        &self,
        input: &ChatTurnInput,
        user_message: &str,
        count: usize,
    ) -> Result<ChatReply, CoreError> {
        let language = input.language;
        let preferences = match input.context.preferences() {
            Some(preferences) => format!("{preferences} {user_message}"),
            None => user_message.to_string(),
        };

        let dishes: Vec<MenuItem> = self.config.fallback_policy.select(
            self.menu_catalog.items(language),
            &preferences,
            count,
        );

        if dishes.is_empty() {
            return Err(CoreError::Unrecoverable);
        }

        Ok(ChatReply {
            message: localized(language, MessageKey::Busy).to_string(),
            recommendations: dishes
                .iter()
                .map(|dish| RecommendationRecord::from_menu_item(dish, None))
                .collect(),
            recommended_dishes: dishes,
            option_picks: Vec::new(),
            source: ReplySource::Fallback,
        })
    }

    fn default_count(&self) -> usize {
        usize::from(self.config.default_count)
    }
}
