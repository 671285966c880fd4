//! Compiled-in default config documents
//!
//! Served whenever the backend has no active document for a key, so
//! config reads always succeed. The review-mode table carries reduced,
//! marketing-free content; production carries the full set.

use crate::contract::Mode;
use serde_json::{json, Value};

/// Default payload for a known key under the given mode.
///
/// Returns None for unknown keys; the resolver substitutes an empty
/// object in that case.
pub fn default_payload(key: &str, mode: Mode) -> Option<Value> {
    match mode {
        Mode::Production => production_default(key),
        Mode::Review => review_default(key),
    }
}

fn production_default(key: &str) -> Option<Value> {
    let payload = match key {
        "hot_searches" => json!({
            "items": [
                { "keyword": "双眼皮", "priority": 100, "isHot": true },
                { "keyword": "瘦脸针", "priority": 90, "isHot": true },
                { "keyword": "玻尿酸", "priority": 80, "isHot": false }
            ]
        }),
        "filter_options" => json!({
            "districts": [
                {
                    "value": "gangnam-gu",
                    "label": "江南区",
                    "labelKr": "강남구",
                    "children": [
                        { "value": "gangnam", "label": "江南站", "labelKr": "강남역" },
                        { "value": "sinsa", "label": "新沙洞", "labelKr": "신사동" },
                        { "value": "apgujeong", "label": "狎鸥亭", "labelKr": "압구정" },
                        { "value": "cheongdam", "label": "清潭洞", "labelKr": "청담동" }
                    ]
                },
                {
                    "value": "seocho-gu",
                    "label": "瑞草区",
                    "labelKr": "서초구",
                    "children": [
                        { "value": "seocho", "label": "瑞草洞", "labelKr": "서초동" },
                        { "value": "banpo", "label": "盘浦洞", "labelKr": "반포동" }
                    ]
                },
                {
                    "value": "mapo-gu",
                    "label": "麻浦区",
                    "labelKr": "마포구",
                    "children": [
                        { "value": "hongdae", "label": "弘大", "labelKr": "홍대" },
                        { "value": "sinchon", "label": "新村", "labelKr": "신촌" }
                    ]
                }
            ],
            "priceRanges": [
                { "value": "0-500000", "label": "50万韩元以下" },
                { "value": "500000-2000000", "label": "50万-200万韩元" },
                { "value": "2000000-", "label": "200万韩元以上" }
            ]
        }),
        "banner_images" => json!({
            "items": [
                { "image": "/images/banner-eyes.jpg", "link": "/services/double-eyelid", "sortOrder": 10 },
                { "image": "/images/banner-nose.jpg", "link": "/services/rhinoplasty", "sortOrder": 5 }
            ]
        }),
        "service_categories" => json!({
            "items": [
                { "value": "eyes", "label": "眼部整形", "labelKr": "눈성형" },
                { "value": "nose", "label": "鼻部整形", "labelKr": "코성형" },
                { "value": "contour", "label": "轮廓整形", "labelKr": "윤곽성형" },
                { "value": "skin", "label": "皮肤管理", "labelKr": "피부관리" },
                { "value": "injection", "label": "微整注射", "labelKr": "쁘띠성형" }
            ]
        }),
        "districts" => json!({
            "items": [
                { "value": "gangnam-gu", "label": "江南区", "labelKr": "강남구" },
                { "value": "seocho-gu", "label": "瑞草区", "labelKr": "서초구" },
                { "value": "songpa-gu", "label": "松坡区", "labelKr": "송파구" },
                { "value": "mapo-gu", "label": "麻浦区", "labelKr": "마포구" },
                { "value": "jung-gu", "label": "中区", "labelKr": "중구" },
                { "value": "yongsan-gu", "label": "龙山区", "labelKr": "용산구" }
            ]
        }),
        "tags" => json!({
            "items": ["资深顾问", "双语服务", "医美专家", "明星同款", "新店优惠"]
        }),
        "promotion_texts" => json!({
            "items": [
                { "text": "新用户首次咨询免费", "link": "/promo/first-visit" },
                { "text": "江南区合作诊所限时折扣", "link": "/promo/gangnam" }
            ]
        }),
        "contact_info" => json!({
            "wechat": "meiyu_service",
            "kakaoTalk": "meiyu_kr",
            "phone": "010-1234-5678",
            "workingHours": "09:00-21:00 (KST)"
        }),
        "app_settings" => json!({
            "bookingEnabled": true,
            "reviewSubmissionEnabled": true,
            "minAppVersion": "1.0.0"
        }),
        _ => return None,
    };
    Some(payload)
}

/// Review-mode content: neutral placeholders with promotion and direct
/// contact channels stripped, so the app passes store review.
fn review_default(key: &str) -> Option<Value> {
    let payload = match key {
        "hot_searches" => json!({
            "items": [
                { "keyword": "皮肤管理", "priority": 100, "isHot": false },
                { "keyword": "美容咨询", "priority": 90, "isHot": false }
            ]
        }),
        "filter_options" => json!({
            "districts": [
                { "value": "gangnam-gu", "label": "江南区", "labelKr": "강남구", "children": [] }
            ],
            "priceRanges": []
        }),
        "banner_images" => json!({ "items": [] }),
        "service_categories" => json!({
            "items": [
                { "value": "skin", "label": "皮肤管理", "labelKr": "피부관리" },
                { "value": "consult", "label": "美容咨询", "labelKr": "미용상담" }
            ]
        }),
        "districts" => json!({
            "items": [
                { "value": "gangnam-gu", "label": "江南区", "labelKr": "강남구" }
            ]
        }),
        "tags" => json!({ "items": [] }),
        "promotion_texts" => json!({ "items": [] }),
        "contact_info" => json!({
            "wechat": "",
            "kakaoTalk": "",
            "phone": "",
            "workingHours": "09:00-18:00 (KST)"
        }),
        "app_settings" => json!({
            "bookingEnabled": false,
            "reviewSubmissionEnabled": false,
            "minAppVersion": "1.0.0"
        }),
        _ => return None,
    };
    Some(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::KNOWN_CONFIG_KEYS;

    #[test]
    fn test_every_known_key_has_defaults_in_both_modes() {
        for key in KNOWN_CONFIG_KEYS {
            assert!(default_payload(key, Mode::Production).is_some(), "{key}");
            assert!(default_payload(key, Mode::Review).is_some(), "{key}");
        }
    }

    #[test]
    fn test_unknown_key_has_no_default() {
        assert!(default_payload("app_mode", Mode::Production).is_none());
        assert!(default_payload("nope", Mode::Review).is_none());
    }

    #[test]
    fn test_review_mode_strips_promotions() {
        let promos = default_payload("promotion_texts", Mode::Review).unwrap();
        assert_eq!(promos["items"].as_array().map(Vec::len), Some(0));

        let settings = default_payload("app_settings", Mode::Review).unwrap();
        assert_eq!(settings["bookingEnabled"], serde_json::json!(false));
    }
}
