//! Admin broadcasts: fan a notification out to an audience with counted,
//! partial-failure-tolerant delivery.

use lakbira_core::notification::{Channel, NotificationType, Priority};
use lakbira_core::types::DbId;
use lakbira_db::models::broadcast::{audiences, Broadcast, CreateBroadcast};
use lakbira_db::repositories::broadcast_repo::BroadcastRepo;

use crate::dispatcher::{DispatchError, Dispatcher, SendOptions};

/// Send a broadcast to every user in the requested audience.
///
/// A broadcast row is created first, then one dispatch runs per recipient;
/// a failed recipient increments `failed_count` and the loop continues.
/// On completion `sent_count + failed_count == total_recipients`, and
/// `delivered_count` mirrors `sent_count` (in-app delivery is synchronous
/// with the insert).
pub async fn send_broadcast(
    dispatcher: &Dispatcher,
    admin_id: Option<DbId>,
    dto: &CreateBroadcast,
) -> Result<Broadcast, DispatchError> {
    if !audiences::ALL.contains(&dto.audience.as_str()) {
        return Err(DispatchError::Validation(format!(
            "unknown audience '{}'",
            dto.audience
        )));
    }

    let kind = NotificationType::parse(&dto.kind).ok_or_else(|| {
        DispatchError::Validation(format!("unknown notification type '{}'", dto.kind))
    })?;

    let channels: Vec<Channel> = if dto.channels.is_empty() {
        vec![Channel::InApp]
    } else {
        dto.channels
            .iter()
            .map(|raw| {
                Channel::parse(raw)
                    .ok_or_else(|| DispatchError::Validation(format!("unknown channel '{raw}'")))
            })
            .collect::<Result<_, _>>()?
    };

    let priority = match &dto.priority {
        Some(raw) => Priority::parse(raw).ok_or_else(|| {
            DispatchError::Validation(format!("unknown priority '{raw}'"))
        })?,
        None => Priority::Medium,
    };

    let target_user_ids = dto.target_user_ids.clone().unwrap_or_default();
    if dto.audience == audiences::SPECIFIC_USERS && target_user_ids.is_empty() {
        return Err(DispatchError::Validation(
            "target_user_ids is required for the specific_users audience".into(),
        ));
    }

    let pool = dispatcher.pool();
    let recipients =
        BroadcastRepo::list_recipients(pool, &dto.audience, &target_user_ids).await?;
    let total = recipients.len() as i32;

    let broadcast =
        BroadcastRepo::create(pool, admin_id, dto, priority.as_str(), total).await?;

    tracing::info!(
        broadcast_id = broadcast.id,
        audience = dto.audience,
        total_recipients = total,
        "Broadcast started"
    );

    let mut sent_count = 0i32;
    let mut failed_count = 0i32;

    for user in &recipients {
        let options = SendOptions {
            title_ar: dto.title_ar.clone(),
            message_ar: dto.message_ar.clone(),
            link: dto.link.clone(),
            channels: channels.clone(),
            priority,
            broadcast_id: Some(broadcast.id),
            ..SendOptions::new(user.id, kind, dto.title.clone(), dto.message.clone())
        };

        match dispatcher.send(options).await {
            Ok(_) => sent_count += 1,
            Err(error) => {
                failed_count += 1;
                tracing::warn!(
                    broadcast_id = broadcast.id,
                    user_id = user.id,
                    %error,
                    "Broadcast recipient failed"
                );
            }
        }
    }

    // In-app rows are delivered the moment they are written.
    let delivered_count = sent_count;

    let finalized =
        BroadcastRepo::finalize(pool, broadcast.id, sent_count, failed_count, delivered_count)
            .await?
            .unwrap_or(broadcast);

    tracing::info!(
        broadcast_id = finalized.id,
        sent_count,
        failed_count,
        "Broadcast completed"
    );

    Ok(finalized)
}
