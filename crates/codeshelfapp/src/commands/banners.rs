use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{BannerDraft, BannerPatch};
use crate::storage::KeyValueStore;
use crate::store::EntityStore;

use super::helpers::require_text;

pub fn list<B: KeyValueStore>(store: &EntityStore<B>, active_only: bool) -> Result<CmdResult> {
    let banners = store
        .banners()
        .iter()
        .filter(|b| !active_only || b.is_active)
        .cloned()
        .collect();
    Ok(CmdResult::default().with_listed_banners(banners))
}

pub fn add<B: KeyValueStore>(store: &mut EntityStore<B>, draft: BannerDraft) -> Result<CmdResult> {
    require_text("Image URL", &draft.image_url)?;
    let draft = BannerDraft {
        image_url: draft.image_url.trim().to_string(),
        link: normalize_link(draft.link),
        is_active: draft.is_active,
    };

    let banner = store.add_banner(draft);
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Banner added ({})", banner.id)));
    Ok(result.with_listed_banners(vec![banner]))
}

/// Set or clear (`None` or blank) the banner's click-through link.
pub fn set_link<B: KeyValueStore>(
    store: &mut EntityStore<B>,
    id: &str,
    link: Option<String>,
) -> Result<CmdResult> {
    let patch = BannerPatch {
        link: Some(normalize_link(link)),
        ..Default::default()
    };
    edit(store, id, &patch, "Banner link updated")
}

pub fn toggle<B: KeyValueStore>(store: &mut EntityStore<B>, id: &str) -> Result<CmdResult> {
    let Some(current) = store.banner(id) else {
        return Ok(not_found(id));
    };
    let patch = BannerPatch {
        is_active: Some(!current.is_active),
        ..Default::default()
    };
    let verb = if current.is_active {
        "Banner deactivated"
    } else {
        "Banner activated"
    };
    edit(store, id, &patch, verb)
}

pub fn delete<B: KeyValueStore>(store: &mut EntityStore<B>, id: &str) -> Result<CmdResult> {
    match store.delete_banner(id) {
        Some(banner) => {
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::success(format!("Banner deleted ({})", banner.id)));
            Ok(result)
        }
        None => Ok(not_found(id)),
    }
}

fn edit<B: KeyValueStore>(
    store: &mut EntityStore<B>,
    id: &str,
    patch: &BannerPatch,
    message: &str,
) -> Result<CmdResult> {
    match store.edit_banner(id, patch) {
        Some(banner) => {
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::success(format!("{} ({})", message, banner.id)));
            Ok(result.with_listed_banners(vec![banner]))
        }
        None => Ok(not_found(id)),
    }
}

fn normalize_link(link: Option<String>) -> Option<String> {
    link.map(|l| l.trim().to_string()).filter(|l| !l.is_empty())
}

fn not_found(id: &str) -> CmdResult {
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::warning(format!("No banner with id {}", id)));
    result
}
