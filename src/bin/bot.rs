use anyhow::Result;
use dotenvy::dotenv;
use log::{debug, error, info, warn};
use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::{Client, Context, EventHandler, GatewayIntents};
use std::sync::Arc;

use waterbot::core::Config;
use waterbot::features::conversation::{ConversationEngine, InboundMessage};
use waterbot::features::reminders::{ReminderDispatcher, ReminderScheduler};
use waterbot::features::subscribers::{RecipientHandle, SubscriberStore, UserId};
use waterbot::messenger::{DiscordMessenger, Messenger};

struct Handler {
    conversation: Arc<ConversationEngine>,
}

impl Handler {
    fn new(conversation: Arc<ConversationEngine>) -> Self {
        Handler { conversation }
    }

    /// Convert a Serenity message into the transport-neutral inbound tuple
    fn to_inbound(msg: &Message) -> InboundMessage {
        InboundMessage::new(
            UserId::new(msg.author.id.to_string()),
            RecipientHandle::new(msg.channel_id.to_string()),
            msg.content.clone(),
        )
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }

        // The conversation only runs in direct messages
        if msg.guild_id.is_some() {
            return;
        }

        let inbound = Self::to_inbound(&msg);
        debug!("Message from {}: {:?}", inbound.user, inbound.text);

        let Some(reply) = self.conversation.handle(&inbound).await else {
            return;
        };

        let messenger = DiscordMessenger::new(ctx.http.clone());
        if let Err(e) = messenger.send(&inbound.recipient, &reply).await {
            error!("Failed to send reply: {e}");
        }
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("🤖 Bot ID: {}", ready.user.id);
        info!(
            "💬 Tracking {} conversation sessions",
            self.conversation.active_sessions()
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting water reminder bot...");

    let store = Arc::new(SubscriberStore::open(&config.subscribers_path).await);
    let conversation = Arc::new(ConversationEngine::new(store.clone()));
    let handler = Handler::new(conversation);

    let intents = GatewayIntents::DIRECT_MESSAGES | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            anyhow::anyhow!("Client creation failed: {}", e)
        })?;

    info!("Bot configured successfully. Connecting to Discord gateway...");

    // Start the reminder scheduler
    let messenger: Arc<dyn Messenger> =
        Arc::new(DiscordMessenger::new(client.cache_and_http.http.clone()));
    let dispatcher = Arc::new(ReminderDispatcher::new(store.clone(), messenger));
    let scheduler = ReminderScheduler::from_config(dispatcher, &config);
    let scheduler_task = tokio::spawn(scheduler.run());

    // Stop the gateway on Ctrl-C; in-flight sends may be dropped
    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {e}");
            return;
        }
        info!("🛑 Shutdown requested");
        shard_manager.lock().await.shutdown_all().await;
    });

    let result = client.start().await;

    scheduler_task.abort();
    if let Err(e) = store.flush().await {
        warn!("Final subscriber flush failed: {e}");
    }

    if let Err(why) = result {
        error!("Gateway connection failed: {why:?}");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    info!("👋 Bot stopped");
    Ok(())
}
