//! Tagged-variant vocabularies shared by the search index and the engine.
//!
//! Each type keeps an explicit label table instead of runtime reflection.
//! Resolution comes in two flavours with different trust assumptions:
//! strict (`from_label`, caller-supplied filter tokens, unknown = error at
//! the call site) and lenient (`from_label_lenient`, ingest-fed documents,
//! unknown falls back to a catch-all).

use serde::Serialize;

/// Service field/category hashtag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ServiceCategory {
    ChildcareEducation,
    HousingIndependence,
    AdministrationSafety,
    AgricultureFishery,
    EmploymentStartup,
    HealthMedical,
    CultureEnvironment,
    LifeStability,
    ProtectionCare,
    PregnancyChildbirth,
    Other,
}

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 11] = [
        ServiceCategory::ChildcareEducation,
        ServiceCategory::HousingIndependence,
        ServiceCategory::AdministrationSafety,
        ServiceCategory::AgricultureFishery,
        ServiceCategory::EmploymentStartup,
        ServiceCategory::HealthMedical,
        ServiceCategory::CultureEnvironment,
        ServiceCategory::LifeStability,
        ServiceCategory::ProtectionCare,
        ServiceCategory::PregnancyChildbirth,
        ServiceCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ServiceCategory::ChildcareEducation => "보육·교육",
            ServiceCategory::HousingIndependence => "주거·자립",
            ServiceCategory::AdministrationSafety => "행정·안전",
            ServiceCategory::AgricultureFishery => "농림축산어업",
            ServiceCategory::EmploymentStartup => "고용·창업",
            ServiceCategory::HealthMedical => "보건·의료",
            ServiceCategory::CultureEnvironment => "문화·환경",
            ServiceCategory::LifeStability => "생활안정",
            ServiceCategory::ProtectionCare => "보호·돌봄",
            ServiceCategory::PregnancyChildbirth => "임신·출산",
            ServiceCategory::Other => "기타",
        }
    }

    /// Strict resolution for caller-supplied filter tokens.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }

    /// Lenient resolution for ingest-fed document fields.
    pub fn from_label_lenient(label: &str) -> Self {
        Self::from_label(label).unwrap_or(ServiceCategory::Other)
    }
}

/// Occupation tags carried on service documents and user profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Occupation {
    Farmer,
    Fisherman,
    StockBreeder,
    Forester,
    ElementaryStudent,
    MiddleSchoolStudent,
    HighSchoolStudent,
    UniversityStudent,
    Worker,
    JobSeeker,
}

impl Occupation {
    pub const ALL: [Occupation; 10] = [
        Occupation::Farmer,
        Occupation::Fisherman,
        Occupation::StockBreeder,
        Occupation::Forester,
        Occupation::ElementaryStudent,
        Occupation::MiddleSchoolStudent,
        Occupation::HighSchoolStudent,
        Occupation::UniversityStudent,
        Occupation::Worker,
        Occupation::JobSeeker,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Occupation::Farmer => "농업인",
            Occupation::Fisherman => "어업인",
            Occupation::StockBreeder => "축산업인",
            Occupation::Forester => "임업인",
            Occupation::ElementaryStudent => "초등학생",
            Occupation::MiddleSchoolStudent => "중학생",
            Occupation::HighSchoolStudent => "고등학생",
            Occupation::UniversityStudent => "대학생/대학원생",
            Occupation::Worker => "근로자/직장인",
            Occupation::JobSeeker => "구직자/실업자",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.label() == label)
    }
}

/// Business-type tags for self-employed and enterprise-targeted services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusinessType {
    StartupPreparation,
    Operating,
    Hardship,
    FoodIndustry,
    Manufacturing,
    OtherIndustry,
    SmallMediumEnterprise,
    SocialWelfareInstitution,
    Organization,
    AgriculturalIndustry,
    InformationTechnology,
}

impl BusinessType {
    pub const ALL: [BusinessType; 11] = [
        BusinessType::StartupPreparation,
        BusinessType::Operating,
        BusinessType::Hardship,
        BusinessType::FoodIndustry,
        BusinessType::Manufacturing,
        BusinessType::OtherIndustry,
        BusinessType::SmallMediumEnterprise,
        BusinessType::SocialWelfareInstitution,
        BusinessType::Organization,
        BusinessType::AgriculturalIndustry,
        BusinessType::InformationTechnology,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BusinessType::StartupPreparation => "예비창업자",
            BusinessType::Operating => "영업중",
            BusinessType::Hardship => "생계곤란/폐업예정자",
            BusinessType::FoodIndustry => "음식업",
            BusinessType::Manufacturing => "제조업",
            BusinessType::OtherIndustry => "기타업종",
            BusinessType::SmallMediumEnterprise => "중소기업",
            BusinessType::SocialWelfareInstitution => "사회복지시설",
            BusinessType::Organization => "기관/단체",
            BusinessType::AgriculturalIndustry => "농업, 임업 및 어업",
            BusinessType::InformationTechnology => "정보통신업",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.label() == label)
    }
}

/// Special target-group hashtags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialGroup {
    MultiCultural,
    NorthKoreanDefector,
    SingleParentFamily,
    SingleMemberHousehold,
    Disabled,
    NationalMeritRecipient,
    ChronicIllness,
}

impl SpecialGroup {
    pub const ALL: [SpecialGroup; 7] = [
        SpecialGroup::MultiCultural,
        SpecialGroup::NorthKoreanDefector,
        SpecialGroup::SingleParentFamily,
        SpecialGroup::SingleMemberHousehold,
        SpecialGroup::Disabled,
        SpecialGroup::NationalMeritRecipient,
        SpecialGroup::ChronicIllness,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SpecialGroup::MultiCultural => "다문화가족",
            SpecialGroup::NorthKoreanDefector => "북한이탈주민",
            SpecialGroup::SingleParentFamily => "한부모가정/조손가정",
            SpecialGroup::SingleMemberHousehold => "1인가구",
            SpecialGroup::Disabled => "장애인",
            SpecialGroup::NationalMeritRecipient => "국가보훈대상자",
            SpecialGroup::ChronicIllness => "질병/질환자",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.label() == label)
    }
}

/// Household-shape hashtags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FamilyType {
    MultiChildrenFamily,
    NonHousingHousehold,
    NewResidence,
    ExtendedFamily,
}

impl FamilyType {
    pub const ALL: [FamilyType; 4] = [
        FamilyType::MultiChildrenFamily,
        FamilyType::NonHousingHousehold,
        FamilyType::NewResidence,
        FamilyType::ExtendedFamily,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FamilyType::MultiChildrenFamily => "다자녀가구",
            FamilyType::NonHousingHousehold => "무주택세대",
            FamilyType::NewResidence => "신규전입",
            FamilyType::ExtendedFamily => "확대가족",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.label() == label)
    }
}
