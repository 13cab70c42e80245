//! Service categories and their intake field schemas.
//!
//! DESIGN
//! ======
//! Every category maps to a fixed, ordered slice of [`FieldDescriptor`]s.
//! Input kinds form a closed set so validation and filtering can match
//! exhaustively. Multi-input fields (plate, license document) are a single
//! [`FieldKind::Composite`] variant carrying their own [`CompositeRule`];
//! a new composite kind is a new rule constant, not a new code path.

use std::fmt;
use std::str::FromStr;

// =============================================================================
// CATEGORY
// =============================================================================

/// Insurance product a visitor can request a quote for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ServiceCategory {
    /// Compulsory traffic liability.
    Traffic,
    /// Comprehensive vehicle cover (kasko).
    Comprehensive,
    /// Compulsory earthquake insurance (DASK).
    Earthquake,
    /// Home insurance.
    Home,
    /// Private health insurance.
    Health,
    /// Business premises insurance.
    Business,
    /// Open quote request from the landing page contact form.
    General,
}

impl ServiceCategory {
    /// All categories in landing-page order.
    pub const ALL: [Self; 7] = [
        Self::Traffic,
        Self::Comprehensive,
        Self::Earthquake,
        Self::Home,
        Self::Health,
        Self::Business,
        Self::General,
    ];

    /// Display name, also used as `serviceName` on the wire.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Traffic => "Trafik Sigortası",
            Self::Comprehensive => "Kasko Sigortası",
            Self::Earthquake => "DASK",
            Self::Home => "Konut Sigortası",
            Self::Health => "Sağlık Sigortası",
            Self::Business => "İşyeri Sigortası",
            Self::General => "Teklif Formu",
        }
    }

    /// ASCII identifier for URLs and command lines.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Traffic => "trafik",
            Self::Comprehensive => "kasko",
            Self::Earthquake => "dask",
            Self::Home => "konut",
            Self::Health => "saglik",
            Self::Business => "isyeri",
            Self::General => "teklif",
        }
    }

    /// Ordered field schema for this category.
    #[must_use]
    pub fn fields(self) -> &'static [FieldDescriptor] {
        match self {
            Self::Traffic => TRAFFIC_FIELDS,
            Self::Comprehensive => COMPREHENSIVE_FIELDS,
            Self::Earthquake => EARTHQUAKE_FIELDS,
            Self::Home => HOME_FIELDS,
            Self::Health => HEALTH_FIELDS,
            Self::Business => BUSINESS_FIELDS,
            Self::General => GENERAL_FIELDS,
        }
    }

    /// Look up a field descriptor by machine key.
    #[must_use]
    pub fn field(self, key: &str) -> Option<&'static FieldDescriptor> {
        self.fields().iter().find(|f| f.key == key)
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string names no known category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown service category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for ServiceCategory {
    type Err = UnknownCategory;

    /// Accepts either the slug (case-insensitive) or the exact display name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.slug().eq_ignore_ascii_case(trimmed) || c.name() == trimmed)
            .ok_or_else(|| UnknownCategory(trimmed.to_owned()))
    }
}

// =============================================================================
// FIELD DESCRIPTORS
// =============================================================================

/// Input kind of a single form field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    MultilineText,
    Date,
    /// Mobile number without leading zero, exactly 10 digits.
    Phone,
    /// T.C. identity number, exactly 11 digits.
    NationalId,
    Numeric,
    Email,
    Composite(&'static CompositeRule),
}

impl FieldKind {
    /// Short lowercase tag, used in listings.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::MultilineText => "multiline",
            Self::Date => "date",
            Self::Phone => "phone",
            Self::NationalId => "national-id",
            Self::Numeric => "numeric",
            Self::Email => "email",
            Self::Composite(rule) => rule.name,
        }
    }
}

/// One field of a category schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Human label; becomes the key of the submitted mapping.
    pub label: &'static str,
    /// Machine name used to address the field while editing.
    pub key: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

/// Allowed characters of a composite sub-part.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Charset {
    /// ASCII letters, stored uppercase.
    Letters,
    /// ASCII digits.
    Digits,
}

impl Charset {
    #[must_use]
    pub fn admits(self, c: char) -> bool {
        match self {
            Self::Letters => c.is_ascii_alphabetic(),
            Self::Digits => c.is_ascii_digit(),
        }
    }
}

/// One sub-input of a composite field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PartRule {
    pub key: &'static str,
    pub label: &'static str,
    pub charset: Charset,
    pub min_len: usize,
    pub max_len: usize,
}

impl PartRule {
    /// True when `value` has the right charset and length.
    #[must_use]
    pub fn accepts(&self, value: &str) -> bool {
        let len = value.chars().count();
        (self.min_len..=self.max_len).contains(&len) && value.chars().all(|c| self.charset.admits(c))
    }
}

/// How several sub-inputs validate and join into one value.
#[derive(Debug, PartialEq, Eq)]
pub struct CompositeRule {
    pub name: &'static str,
    pub parts: &'static [PartRule],
    pub separator: &'static str,
}

impl CompositeRule {
    /// Index of the sub-part named `key`.
    #[must_use]
    pub fn part_index(&self, key: &str) -> Option<usize> {
        self.parts.iter().position(|p| p.key == key)
    }

    /// Join already-validated parts with the separator.
    #[must_use]
    pub fn assemble(&self, parts: &[String]) -> String {
        parts.join(self.separator)
    }
}

/// Vehicle plate: province code, letter group, number (`34-ABC-1234`).
pub const PLATE: CompositeRule = CompositeRule {
    name: "plate",
    parts: &[
        PartRule { key: "il", label: "İl Kodu", charset: Charset::Digits, min_len: 2, max_len: 2 },
        PartRule { key: "harf", label: "Harf", charset: Charset::Letters, min_len: 1, max_len: 4 },
        PartRule { key: "numara", label: "Numara", charset: Charset::Digits, min_len: 4, max_len: 4 },
    ],
    separator: "-",
};

/// Vehicle license document: series letters and number (`AB-123456`).
pub const LICENSE_DOCUMENT: CompositeRule = CompositeRule {
    name: "document",
    parts: &[
        PartRule { key: "seri", label: "Seri", charset: Charset::Letters, min_len: 2, max_len: 2 },
        PartRule { key: "numara", label: "Numara", charset: Charset::Digits, min_len: 6, max_len: 6 },
    ],
    separator: "-",
};

// =============================================================================
// SCHEMAS
// =============================================================================

const FULL_NAME: FieldDescriptor =
    FieldDescriptor { label: "Ad Soyad", key: "ad_soyad", kind: FieldKind::Text, required: true };
const NATIONAL_ID: FieldDescriptor =
    FieldDescriptor { label: "T.C. Kimlik No", key: "tc_kimlik", kind: FieldKind::NationalId, required: true };
const PHONE: FieldDescriptor =
    FieldDescriptor { label: "Telefon", key: "telefon", kind: FieldKind::Phone, required: true };
const EMAIL: FieldDescriptor =
    FieldDescriptor { label: "E-posta", key: "eposta", kind: FieldKind::Email, required: false };
const NOTE: FieldDescriptor =
    FieldDescriptor { label: "Notunuz", key: "not", kind: FieldKind::MultilineText, required: false };
const PLATE_FIELD: FieldDescriptor =
    FieldDescriptor { label: "Plaka", key: "plaka", kind: FieldKind::Composite(&PLATE), required: true };
const LICENSE_FIELD: FieldDescriptor = FieldDescriptor {
    label: "Ruhsat Seri No",
    key: "ruhsat",
    kind: FieldKind::Composite(&LICENSE_DOCUMENT),
    required: true,
};
const ADDRESS: FieldDescriptor =
    FieldDescriptor { label: "Adres", key: "adres", kind: FieldKind::MultilineText, required: true };
const AREA: FieldDescriptor =
    FieldDescriptor { label: "Brüt Metrekare", key: "metrekare", kind: FieldKind::Numeric, required: true };

static TRAFFIC_FIELDS: &[FieldDescriptor] = &[FULL_NAME, NATIONAL_ID, PHONE, EMAIL, PLATE_FIELD, LICENSE_FIELD, NOTE];

static COMPREHENSIVE_FIELDS: &[FieldDescriptor] = &[
    FULL_NAME,
    NATIONAL_ID,
    PHONE,
    EMAIL,
    PLATE_FIELD,
    LICENSE_FIELD,
    FieldDescriptor { label: "Araç Model Yılı", key: "model_yili", kind: FieldKind::Numeric, required: false },
    NOTE,
];

static EARTHQUAKE_FIELDS: &[FieldDescriptor] = &[
    FULL_NAME,
    NATIONAL_ID,
    PHONE,
    EMAIL,
    ADDRESS,
    AREA,
    FieldDescriptor { label: "Bina Yapım Yılı", key: "yapim_yili", kind: FieldKind::Numeric, required: false },
    NOTE,
];

static HOME_FIELDS: &[FieldDescriptor] = &[FULL_NAME, NATIONAL_ID, PHONE, EMAIL, ADDRESS, AREA, NOTE];

static HEALTH_FIELDS: &[FieldDescriptor] = &[
    FULL_NAME,
    NATIONAL_ID,
    PHONE,
    EMAIL,
    FieldDescriptor { label: "Doğum Tarihi", key: "dogum_tarihi", kind: FieldKind::Date, required: true },
    NOTE,
];

static BUSINESS_FIELDS: &[FieldDescriptor] = &[
    FULL_NAME,
    FieldDescriptor { label: "Firma Adı", key: "firma", kind: FieldKind::Text, required: true },
    PHONE,
    EMAIL,
    FieldDescriptor { label: "İşyeri Adresi", key: "adres", kind: FieldKind::MultilineText, required: true },
    FieldDescriptor { label: "Faaliyet Alanı", key: "faaliyet", kind: FieldKind::Text, required: false },
    NOTE,
];

// Product is left to the message; no identity number is asked for.
static GENERAL_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor { label: "Ad", key: "ad", kind: FieldKind::Text, required: true },
    FieldDescriptor { label: "Soyad", key: "soyad", kind: FieldKind::Text, required: true },
    EMAIL,
    PHONE,
    FieldDescriptor { label: "Mesajınız", key: "mesaj", kind: FieldKind::MultilineText, required: false },
];

#[cfg(test)]
#[path = "schema_test.rs"]
mod tests;
