use crate::domain::model::{
    ApiResponse, Candidate, ClassOffering, ProviderId, ScheduleDocument, TimeBlock,
};
use crate::utils::error::{BookingError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;

/// 將 API 回應解析為課表結構，缺少 days 或 classByDateMap 時回傳 FormatError
pub fn parse_schedule(response: &ApiResponse) -> Result<ScheduleDocument> {
    match response {
        ApiResponse::Json(value) => serde_json::from_value(value.clone()).map_err(|e| {
            BookingError::format(format!(
                "expected a days list and a classByDateMap object ({})",
                e
            ))
        }),
        ApiResponse::Text(text) => Err(BookingError::format(format!(
            "expected a JSON document, got text: {}",
            truncate(text, 200)
        ))),
    }
}

/// 依場館、時段與偏好課程篩選可預約課程，並依偏好順序排序
///
/// 只看 `days` 中最後一天 (最晚可預約日)。時段或場館不存在時回傳空清單；
/// 同一 workout id 的課程維持供應商原本的順序。
pub fn select_candidates(
    document: &ScheduleDocument,
    center_id: &str,
    slot: &str,
    preferred_workout_ids: &[String],
) -> Result<Vec<Candidate>> {
    let date = latest_date(document)?;
    let time_blocks = time_blocks_for(document, &date)?;

    tracing::debug!("Selecting from date={} ({} time blocks)", date, time_blocks.len());

    let Some(time_block) = time_blocks
        .iter()
        .find(|block| block.id.as_ref().is_some_and(|id| id.as_str() == slot))
    else {
        tracing::debug!("Slot {} not offered on {}", slot, date);
        return Ok(Vec::new());
    };

    let Some(center_block) = time_block
        .center_wise_classes
        .iter()
        .find(|center| center.center_id.as_ref().is_some_and(|id| id.as_str() == center_id))
    else {
        tracing::debug!("Center {} has no classes at {} on {}", center_id, slot, date);
        return Ok(Vec::new());
    };

    let preferred: HashSet<&str> = preferred_workout_ids.iter().map(String::as_str).collect();

    let mut candidates: Vec<Candidate> = center_block
        .classes
        .iter()
        .filter_map(|offering| to_candidate(offering, &preferred, preferred_workout_ids))
        .collect();

    // sort_by_key 為穩定排序；不在偏好清單中的 rank 視為 -1
    candidates.sort_by_key(|c| c.rank.map_or(-1, |r| r as i64));

    Ok(candidates)
}

fn latest_date(document: &ScheduleDocument) -> Result<ProviderId> {
    let last_day = document
        .days
        .last()
        .ok_or_else(|| BookingError::format("days list is empty"))?;

    last_day
        .get("id")
        .and_then(ProviderId::from_value)
        .ok_or_else(|| BookingError::format("could not determine latest bookable date"))
}

/// 只解析選定日期的 classByTimeList；其他日期的內容不影響結果
fn time_blocks_for(document: &ScheduleDocument, date: &ProviderId) -> Result<Vec<TimeBlock>> {
    let day = document.class_by_date_map.get(date.as_str());
    match day.and_then(|d| d.get("classByTimeList")) {
        Some(Value::Array(items)) => Ok(items
            .iter()
            .filter_map(|item| TimeBlock::deserialize(item).ok())
            .collect()),
        _ => Err(BookingError::format(format!("no classByTimeList for date={}", date))),
    }
}

fn to_candidate(
    offering: &ClassOffering,
    preferred: &HashSet<&str>,
    preferred_workout_ids: &[String],
) -> Option<Candidate> {
    let workout_id = offering.workout_id.as_ref()?;
    if !preferred.contains(workout_id.as_str()) {
        return None;
    }

    let state = offering.state.as_ref().filter(|s| s.is_available())?;

    let Some(activity_id) = offering.id.as_ref() else {
        tracing::debug!("Skipping AVAILABLE class without id (workoutId={})", workout_id);
        return None;
    };

    Some(Candidate {
        activity_id: activity_id.clone(),
        workout_id: workout_id.clone(),
        state: state.clone(),
        start_time: offering.start_time.clone(),
        end_time: offering.end_time.clone(),
        rank: preferred_workout_ids
            .iter()
            .position(|id| id == workout_id.as_str()),
    })
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}
