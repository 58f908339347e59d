//! Dispatcher 运行：普通消息交给 HandlerChain，菜单回调交给 SelectionHandler。
//! Ctrl-C 停止 dispatcher 并把控制权交还调用方。

use std::sync::Arc;

use anyhow::Result;
use digest_core::{Message as CoreMessage, SelectionHandler, ToCoreMessage, ToCoreUser};
use handler_chain::HandlerChain;
use teloxide::prelude::*;
use tracing::{error, info, instrument, warn};

use super::adapters::{core_chat, TelegramMessageWrapper, TelegramUserWrapper};

/// 以 long polling 运行 dispatcher，直到 Ctrl-C。
/// 同一 chat 的消息按到达顺序依次处理（不同 chat 并发）；菜单回调在独立任务中执行，长时间分析不阻塞消息采集。
#[instrument(skip(bot, handler_chain, selection))]
pub async fn run_dispatcher(
    bot: teloxide::Bot,
    handler_chain: HandlerChain,
    selection: Arc<dyn SelectionHandler>,
) -> Result<()> {
    match bot.get_me().await {
        Ok(me) => info!(username = ?me.user.username, "Bot identity resolved"),
        Err(e) => warn!(error = %e, "get_me failed, continuing"),
    }

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_callback_query().endpoint(on_callback));

    info!("step: dispatcher started");
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![handler_chain, selection])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
    info!("step: dispatcher stopped");

    Ok(())
}

async fn on_message(msg: Message, chain: HandlerChain) -> ResponseResult<()> {
    let core_msg = TelegramMessageWrapper(&msg).to_core();
    handle_in_order(&chain, &core_msg).await;
    Ok(())
}

/// Runs the chain to completion before the dispatcher takes the chat's next update, so stored
/// ids follow arrival order.
pub(crate) async fn handle_in_order(chain: &HandlerChain, core_msg: &CoreMessage) {
    info!(
        user_id = core_msg.user.id,
        chat_id = core_msg.chat.id,
        message_id = %core_msg.id,
        "step: processing message (handler chain started)"
    );
    if let Err(e) = chain.handle(core_msg).await {
        error!(error = %e, user_id = core_msg.user.id, "Handler chain failed");
    }
}

async fn on_callback(
    bot: Bot,
    q: CallbackQuery,
    selection: Arc<dyn SelectionHandler>,
) -> ResponseResult<()> {
    if let Err(e) = bot.answer_callback_query(q.id.clone()).await {
        warn!(error = %e, "answer_callback_query failed");
    }

    let (Some(payload), Some(message)) = (q.data.clone(), q.message.as_ref()) else {
        warn!(user_id = q.from.id.0, "Callback without data or message ignored");
        return Ok(());
    };
    let requester = core_chat(message.chat());
    let user = TelegramUserWrapper(&q.from).to_core();

    tokio::spawn(async move {
        info!(
            user_id = user.id,
            chat_id = requester.id,
            payload = %payload,
            "step: menu selection received"
        );
        if let Err(e) = selection.on_selection(&requester, &user, &payload).await {
            error!(error = %e, chat_id = requester.id, "Selection handling failed");
        }
    });

    Ok(())
}
