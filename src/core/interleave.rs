use crate::core::{DisplayItem, DisplayList, MenuEntry, NativeAd};

/// Spacing between consecutive ads. Always at least 1.
///
/// Callers must not pass `ad_count == 0`; there is nothing to space out.
pub fn stride(primary_len: usize, ad_count: usize) -> usize {
    debug_assert!(ad_count > 0);
    primary_len / ad_count + 1
}

/// Spreads `ads` through `primary`, ad `i` landing at index `i * stride` of
/// the list as it grows.
pub fn interleave(primary: Vec<MenuEntry>, ads: Vec<NativeAd>) -> DisplayList {
    interleave_items(primary.into_iter().map(DisplayItem::Menu).collect(), ads)
}

/// Same as [`interleave`] over rows that may already contain ads.
///
/// Stride is computed from the row count before any insertion. Positions past
/// the end of the growing list append instead of failing.
pub fn interleave_items(mut items: Vec<DisplayItem>, ads: Vec<NativeAd>) -> DisplayList {
    if ads.is_empty() {
        return DisplayList::new(items);
    }

    let offset = stride(items.len(), ads.len());
    tracing::debug!(
        "Interleaving {} ads into {} rows with stride {}",
        ads.len(),
        items.len(),
        offset
    );

    items.reserve(ads.len());
    let mut index = 0usize;
    for ad in ads {
        let position = index.min(items.len());
        items.insert(position, DisplayItem::Ad(ad));
        index = index.saturating_add(offset);
    }

    DisplayList::new(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ContentAd;

    fn menu(i: usize) -> MenuEntry {
        MenuEntry {
            name: format!("m{}", i),
            description: String::new(),
            price: "$1.00".to_string(),
            category: "Test".to_string(),
            image_ref: String::new(),
        }
    }

    fn ad(i: usize) -> NativeAd {
        NativeAd::Content(ContentAd {
            headline: format!("a{}", i),
            body: String::new(),
            call_to_action: "Go".to_string(),
            image: None,
            advertiser: None,
            logo: None,
        })
    }

    fn labels(list: &DisplayList) -> Vec<String> {
        list.iter()
            .map(|item| match item {
                DisplayItem::Menu(entry) => entry.name.clone(),
                DisplayItem::Ad(ad) => ad.headline().to_string(),
            })
            .collect()
    }

    #[test]
    fn test_stride() {
        assert_eq!(stride(10, 2), 6);
        assert_eq!(stride(0, 3), 1);
        assert_eq!(stride(3, 5), 1);
        assert_eq!(stride(12, 5), 3);
    }

    #[test]
    fn test_empty_inputs() {
        let list = interleave(vec![], vec![]);
        assert!(list.is_empty());
    }

    #[test]
    fn test_no_ads_leaves_menu_unchanged() {
        let entries: Vec<MenuEntry> = (0..10).map(menu).collect();
        let list = interleave(entries.clone(), vec![]);
        assert_eq!(list, DisplayList::from_menu(entries));
    }

    #[test]
    fn test_two_ads_into_ten_items() {
        let list = interleave((0..10).map(menu).collect(), vec![ad(0), ad(1)]);
        assert_eq!(
            labels(&list),
            vec!["a0", "m0", "m1", "m2", "m3", "m4", "a1", "m5", "m6", "m7", "m8", "m9"]
        );
    }

    #[test]
    fn test_ads_only() {
        let list = interleave(vec![], vec![ad(0), ad(1), ad(2)]);
        assert_eq!(labels(&list), vec!["a0", "a1", "a2"]);
    }

    #[test]
    fn test_more_ads_than_rows() {
        let list = interleave(vec![menu(0)], vec![ad(0), ad(1), ad(2), ad(3)]);
        assert_eq!(list.len(), 5);
        assert_eq!(labels(&list), vec!["a0", "a1", "a2", "a3", "m0"]);
    }

    #[test]
    fn test_five_ads_into_twelve_items() {
        let list = interleave((0..12).map(menu).collect(), (0..5).map(ad).collect());
        assert_eq!(list.len(), 17);
        assert_eq!(list.ad_count(), 5);
        let positions: Vec<usize> = list
            .iter()
            .enumerate()
            .filter(|(_, item)| item.is_ad())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(positions, vec![0, 3, 6, 9, 12]);
    }

    #[test]
    fn test_rerun_without_ads_is_identity() {
        let once = interleave((0..7).map(menu).collect(), vec![ad(0), ad(1)]);
        let twice = interleave_items(once.clone().into_items(), vec![]);
        assert_eq!(once, twice);
    }
}
