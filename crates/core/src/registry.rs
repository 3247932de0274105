//! Category registry: the static mapping from product categories to their
//! storage table, display label, and ordered spec-field definitions.
//!
//! This is the single source of truth for category data. Every catalog
//! operation (read fan-out, slug probing, spec extraction, admin writes)
//! resolves categories through this module; nothing redefines the maps
//! locally.

use serde::{Deserialize, Serialize};

/// A category-scoped spec field: display label, canonical storage column,
/// and legacy read-compat aliases.
///
/// Canonical keys double as column names in the category's table. Aliases
/// are accepted when reading stored rows and when resolving admin form
/// input, but never written as columns themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub label: &'static str,
    pub key: &'static str,
    pub aliases: &'static [&'static str],
}

const fn field(label: &'static str, key: &'static str) -> FieldDef {
    FieldDef {
        label,
        key,
        aliases: &[],
    }
}

const fn field_aliased(
    label: &'static str,
    key: &'static str,
    aliases: &'static [&'static str],
) -> FieldDef {
    FieldDef {
        label,
        key,
        aliases,
    }
}

const TOPLIGHT_FIELDS: &[FieldDef] = &[
    field("정격전압", "voltage"),
    field("방수등급", "waterproof"),
    field("밝기", "brightness"),
    field("인증", "certification"),
    field_aliased("유효거리", "effective_range", &["range", "valid_range"]),
    field("제품크기", "size"),
    field("제품무게", "weight"),
    field_aliased("작동전류", "operating_current", &["op_current", "working_current"]),
    field_aliased("제품수명", "lifespan", &["life", "life_span"]),
    field_aliased(
        "제품출력",
        "product_output",
        &["productOutput", "output_power", "output", "power_output"],
    ),
];

const SPEAKER_FIELDS: &[FieldDef] = &[
    field("사용범위", "range"),
    field_aliased("동작전원", "power", &["operating_power"]),
    field("제품크기", "size"),
    field("센서", "sensor"),
    field_aliased("탐지거리", "detection_distance", &["detect_distance", "detectionRange"]),
    field_aliased("동작시간", "operating_time", &["operation_time"]),
    field("배터리", "battery"),
    field("음량", "volume"),
    field("방수등급", "waterproof"),
];

const ETC_FIELDS: &[FieldDef] = &[
    field("사용범위", "range"),
    field("동작전원", "power"),
    field_aliased("소모전류", "current_consumption", &["consumption_current"]),
    field_aliased("인식범위", "recognition_range", &["recognitionRange"]),
    field_aliased("추가기능1", "extra_feature_1", &["extra1"]),
    field_aliased("추가기능2", "extra_feature_2", &["extra2"]),
    field_aliased("추가기능3", "extra_feature_3", &["extra3"]),
    field_aliased("비고", "note", &["remarks"]),
    field("디스플레이", "display"),
    field_aliased("해상도 및 화각", "resolution_fov", &["resolution", "fov"]),
    field_aliased("충전시간", "charging_time", &["charge_time"]),
    field_aliased("촬영가능시간", "recording_time", &["record_time"]),
    field("배터리", "battery"),
    field("각도", "angle"),
];

const HEAVY_FIELDS: &[FieldDef] = &[
    field_aliased("입력전원", "input_power", &["input"]),
    field_aliased("소비전력", "power_consumption", &["consumption_power"]),
    field_aliased("출력방식", "output_method", &["output"]),
    field_aliased("방수·방진 등급", "ip_rating", &["ip", "ipRate"]),
    field("하우징 소재", "housing_material"),
    field("브라켓 소재", "bracket_material"),
    field("렌즈 소재", "lens_material"),
    field_aliased("사용온도 범위", "operating_temperature", &["temperature_range"]),
    field_aliased("수명", "lifespan", &["life"]),
    field_aliased("적용 차량", "applicable_vehicles", &["vehicles"]),
];

const COOLING_FIELDS: &[FieldDef] = &[
    field("냉방능력", "cooling_capacity"),
    field("소비전력", "power_consumption"),
    field_aliased("정격전압", "rated_voltage", &["voltage"]),
    field_aliased("정격전류", "rated_current", &["current"]),
    field("사용냉매", "refrigerant"),
    field("토출구", "outlet"),
    field("제품무게", "weight"),
    field("제품크기", "size"),
    field("냉품범위", "cooling_range"),
    field("물탱크용량", "water_tank_capacity"),
    field("연속가동", "continuous_operation"),
    field("추가기능", "extra_features"),
    field("풍량", "airflow"),
    field("최대RPM", "max_rpm"),
    field("방수등급", "waterproof"),
    field("소음레벨", "noise_level"),
    field("송풍거리", "air_distance"),
    field("주파수", "frequency_hz"),
];

/// A product category. The five active categories each own one spec table;
/// `Light` is a legacy undifferentiated table kept for read compatibility
/// only and is never written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Heavy,
    Toplight,
    Speaker,
    Cooling,
    Etc,
    Light,
}

impl Category {
    /// Active (writable, listed) categories in declared display order.
    pub const ACTIVE: [Category; 5] = [
        Category::Heavy,
        Category::Toplight,
        Category::Speaker,
        Category::Cooling,
        Category::Etc,
    ];

    /// Slug-probe order. The legacy table is probed first, matching the
    /// lookup order the production data was shaped under; a slug present
    /// in two tables resolves to the earlier entry here.
    pub const PROBE: [Category; 6] = [
        Category::Light,
        Category::Heavy,
        Category::Toplight,
        Category::Speaker,
        Category::Cooling,
        Category::Etc,
    ];

    /// Canonical lowercase identifier, as stored in `category` columns.
    pub fn key(self) -> &'static str {
        match self {
            Category::Heavy => "heavy",
            Category::Toplight => "toplight",
            Category::Speaker => "speaker",
            Category::Cooling => "cooling",
            Category::Etc => "etc",
            Category::Light => "light",
        }
    }

    /// Storage table owning this category's rows.
    pub fn table(self) -> &'static str {
        match self {
            Category::Heavy => "heavy_specs",
            Category::Toplight => "toplight_specs",
            Category::Speaker => "speaker_specs",
            Category::Cooling => "cooling_specs",
            Category::Etc => "etc_specs",
            // Historical typo preserved: the legacy table really is named this.
            Category::Light => "products_ligt",
        }
    }

    /// Human-readable display label.
    pub fn label(self) -> &'static str {
        match self {
            Category::Heavy => "지게차 / 중장비",
            Category::Toplight => "탑라이트 / 표시기",
            Category::Speaker => "음성경보장치 / 스피커",
            Category::Cooling => "이동식 에어컨 / 냉각팬",
            Category::Etc => "카메라 외 기타",
            Category::Light => "기타 제품",
        }
    }

    /// Ordered spec-field definitions for this category. The legacy table
    /// carries no structured spec columns.
    pub fn spec_fields(self) -> &'static [FieldDef] {
        match self {
            Category::Heavy => HEAVY_FIELDS,
            Category::Toplight => TOPLIGHT_FIELDS,
            Category::Speaker => SPEAKER_FIELDS,
            Category::Cooling => COOLING_FIELDS,
            Category::Etc => ETC_FIELDS,
            Category::Light => &[],
        }
    }

    /// Whether admin writes may target this category.
    pub fn is_writable(self) -> bool {
        !matches!(self, Category::Light)
    }

    /// Parse an exact canonical key. Fails for anything outside the closed set.
    pub fn parse(s: &str) -> Option<Category> {
        match s {
            "heavy" => Some(Category::Heavy),
            "toplight" => Some(Category::Toplight),
            "speaker" => Some(Category::Speaker),
            "cooling" => Some(Category::Cooling),
            "etc" => Some(Category::Etc),
            "light" => Some(Category::Light),
            _ => None,
        }
    }

    /// Tolerant matcher for category values found in stored rows.
    ///
    /// Accepts the canonical key or any value containing the known Korean
    /// label fragments. Returns `None` for blank or unrecognizable input,
    /// in which case callers fall back to the table the row came from.
    pub fn normalize(raw: &str) -> Option<Category> {
        let c = raw.trim().to_lowercase();
        if c.is_empty() {
            return None;
        }
        // "기타 제품" must be checked before the bare "기타" fragment.
        if c == "light" || c.contains("기타 제품") {
            return Some(Category::Light);
        }
        if c == "heavy" || c.contains("중장비") || c.contains("지게차") {
            return Some(Category::Heavy);
        }
        if c == "toplight" || c.contains("탑라이트") || c.contains("표시기") {
            return Some(Category::Toplight);
        }
        if c == "speaker" || c.contains("스피커") || c.contains("음성") {
            return Some(Category::Speaker);
        }
        if c == "cooling" || c.contains("에어컨") || c.contains("냉각") {
            return Some(Category::Cooling);
        }
        if c == "etc" || c.contains("기타") || c.contains("카메라") {
            return Some(Category::Etc);
        }
        None
    }
}
