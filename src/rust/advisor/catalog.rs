//! Fixed lookup tables from classifier labels to crop names and from crop
//! names to illustrative images.

use std::collections::HashMap;

use lazy_static::lazy_static;

/// Image shown when a crop has no picture of its own.
pub const DEFAULT_IMAGE_URL: &str = "default.png";

/// Label emitted by the classifier and the crop it stands for.
pub const CROPS: [(i64, &str); 22] = [
    (1, "Rice"),
    (2, "Maize"),
    (3, "Jute"),
    (4, "Cotton"),
    (5, "Coconut"),
    (6, "Papaya"),
    (7, "Orange"),
    (8, "Apple"),
    (9, "Muskmelon"),
    (10, "Watermelon"),
    (11, "Grapes"),
    (12, "Mango"),
    (13, "Banana"),
    (14, "Pomegranate"),
    (15, "Lentil"),
    (16, "Blackgram"),
    (17, "Mungbean"),
    (18, "Mothbeans"),
    (19, "Pigeonpeas"),
    (20, "Kidneybeans"),
    (21, "Chickpea"),
    (22, "Coffee"),
];

pub const CROP_IMAGES: [(&str, &str); 22] = [
    ("Rice", "https://images.pexels.com/photos/164504/pexels-photo-164504.jpeg"),
    ("Maize", "https://images.pexels.com/photos/547264/pexels-photo-547264.jpeg"),
    ("Jute", "https://images.pexels.com/photos/14251547/pexels-photo-14251547.jpeg"),
    ("Cotton", "https://images.pexels.com/photos/5474394/pexels-photo-5474394.jpeg"),
    ("Coconut", "https://images.pexels.com/photos/7676779/pexels-photo-7676779.jpeg"),
    ("Papaya", "https://images.pexels.com/photos/5217968/pexels-photo-5217968.jpeg"),
    ("Orange", "https://images.pexels.com/photos/327098/pexels-photo-327098.jpeg"),
    ("Apple", "https://images.pexels.com/photos/209439/pexels-photo-209439.jpeg"),
    ("Muskmelon", "https://media.istockphoto.com/id/480915274/photo/fresh-melon.jpg?b=1&s=612x612&w=0&k=20&c=Oh64YXvB9ViROZoO41y9PtPRs4zsp67UmTeJRHpoITY="),
    ("Watermelon", "https://images.pexels.com/photos/1313267/pexels-photo-1313267.jpeg"),
    ("Grapes", "https://images.pexels.com/photos/60021/grapes-wine-fruit-vines-60021.jpeg"),
    ("Mango", "https://images.pexels.com/photos/2294471/pexels-photo-2294471.jpeg"),
    // no picture yet
    ("Banana", DEFAULT_IMAGE_URL),
    ("Pomegranate", "https://images.pexels.com/photos/4869085/pexels-photo-4869085.jpeg"),
    ("Lentil", "https://images.pexels.com/photos/6086414/pexels-photo-6086414.jpeg"),
    ("Blackgram", "https://media.istockphoto.com/id/1158693674/photo/dry-organic-murad-split-matpe-beans.jpg?b=1&s=612x612&w=0&k=20&c=cW9B8Pcjqc03EwtzcpkBvL25NqElF0Hu7Rsw6rK4ois="),
    ("Mungbean", "https://media.istockphoto.com/id/1310279351/photo/macro-close-up-of-organic-green-gram-or-whole-green-moong-dal-on-a-white-ceramic-soup-spoon.jpg?b=1&s=612x612&w=0&k=20&c=bFzTVvS8JWM-Au9lkj_GFavFkKhYT1NVI1K5l1C04Fo="),
    ("Mothbeans", "https://media.istockphoto.com/id/1310610629/photo/full-frame-shot-of-turkish-gram-grains-forming-texture.jpg?b=1&s=612x612&w=0&k=20&c=RcgMen1bfwMkpYT-pwfM9iNuyoliB-fKtUfl-_scqhI="),
    ("Pigeonpeas", "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcS7v-o3QG6B4ERJ_8m1pBphaFb13Fc0YmYNHw&s"),
    ("Kidneybeans", "https://images.pexels.com/photos/6316673/pexels-photo-6316673.jpeg"),
    ("Chickpea", "https://images.pexels.com/photos/14440733/pexels-photo-14440733.jpeg"),
    ("Coffee", "https://images.pexels.com/photos/1695052/pexels-photo-1695052.jpeg"),
];

lazy_static! {
    static ref CROP_CATALOG: HashMap<i64, &'static str> = CROPS.iter().copied().collect();
    static ref IMAGE_CATALOG: HashMap<&'static str, &'static str> =
        CROP_IMAGES.iter().copied().collect();
}

/// Returns the crop a classifier label stands for, if the label is known.
pub fn lookup_crop(label: i64) -> Option<&'static str> {
    CROP_CATALOG.get(&label).copied()
}

/// Returns the image for a crop, or [`DEFAULT_IMAGE_URL`] for unknown names.
pub fn lookup_image(crop: &str) -> &'static str {
    IMAGE_CATALOG.get(crop).copied().unwrap_or(DEFAULT_IMAGE_URL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_label_is_known() {
        for label in 1..=22 {
            assert!(lookup_crop(label).is_some(), "label {} has no crop", label);
        }
        assert_eq!(lookup_crop(1), Some("Rice"));
        assert_eq!(lookup_crop(22), Some("Coffee"));
    }

    #[test]
    fn test_unknown_labels() {
        assert_eq!(lookup_crop(0), None);
        assert_eq!(lookup_crop(23), None);
        assert_eq!(lookup_crop(-1), None);
    }

    #[test]
    fn test_known_crop_images() {
        for (crop, url) in CROP_IMAGES {
            assert_eq!(lookup_image(crop), url, "wrong image for {}", crop);
        }
        assert_eq!(
            lookup_image("Rice"),
            "https://images.pexels.com/photos/164504/pexels-photo-164504.jpeg"
        );
        assert_eq!(
            lookup_image("Pigeonpeas"),
            "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcS7v-o3QG6B4ERJ_8m1pBphaFb13Fc0YmYNHw&s"
        );
        assert_eq!(
            lookup_image("Coffee"),
            "https://images.pexels.com/photos/1695052/pexels-photo-1695052.jpeg"
        );
    }

    #[test]
    fn test_every_crop_has_an_image_entry() {
        for (label, crop) in CROPS {
            assert!(
                CROP_IMAGES.iter().any(|(name, _)| *name == crop),
                "label {} ({}) has no image entry",
                label,
                crop
            );
        }
        assert_eq!(IMAGE_CATALOG.len(), CROP_IMAGES.len());
        assert_eq!(lookup_image("Banana"), DEFAULT_IMAGE_URL);
    }

    #[test]
    fn test_unknown_crop_image_is_default() {
        assert_eq!(lookup_image("Wheat"), DEFAULT_IMAGE_URL);
        assert_eq!(lookup_image("rice"), DEFAULT_IMAGE_URL);
        assert_eq!(lookup_image(""), DEFAULT_IMAGE_URL);
    }
}
