//! Income bracket estimation from a free-text occupation or business label.
//!
//! Total function: every input maps to a bracket, unknown labels fall
//! through to keyword matching and finally to a default.

use crate::models::domain::IncomeBracket;
use crate::models::tags::{BusinessType, Occupation};

/// Estimate the income bracket for a job/business label.
///
/// Resolution order: exact occupation tag, exact business-type tag, generic
/// keyword substrings, default. Blank input estimates `Middle`.
pub fn estimate(job: &str) -> IncomeBracket {
    let job = job.trim();
    if job.is_empty() {
        return IncomeBracket::Middle;
    }

    if let Some(occupation) = Occupation::from_label(job) {
        return by_occupation(occupation);
    }

    if let Some(business) = BusinessType::from_label(job) {
        return by_business_type(business);
    }

    by_generic_keyword(job)
}

fn by_occupation(occupation: Occupation) -> IncomeBracket {
    match occupation {
        Occupation::ElementaryStudent
        | Occupation::MiddleSchoolStudent
        | Occupation::HighSchoolStudent
        | Occupation::JobSeeker => IncomeBracket::Low,

        Occupation::UniversityStudent => IncomeBracket::MiddleLow,

        Occupation::Farmer
        | Occupation::Fisherman
        | Occupation::StockBreeder
        | Occupation::Forester => IncomeBracket::Middle,

        Occupation::Worker => IncomeBracket::MiddleHigh,
    }
}

fn by_business_type(business: BusinessType) -> IncomeBracket {
    match business {
        BusinessType::Hardship => IncomeBracket::Low,

        BusinessType::StartupPreparation | BusinessType::FoodIndustry => IncomeBracket::MiddleLow,

        BusinessType::Operating
        | BusinessType::OtherIndustry
        | BusinessType::AgriculturalIndustry => IncomeBracket::Middle,

        BusinessType::Manufacturing | BusinessType::SmallMediumEnterprise => {
            IncomeBracket::MiddleHigh
        }

        BusinessType::InformationTechnology
        | BusinessType::Organization
        | BusinessType::SocialWelfareInstitution => IncomeBracket::High,
    }
}

fn by_generic_keyword(job: &str) -> IncomeBracket {
    let job = job.to_lowercase();

    let contains_any = |keywords: &[&str]| keywords.iter().any(|k| job.contains(k));

    if contains_any(&["학생", "구직자", "실업자"]) {
        return IncomeBracket::Low;
    }
    if contains_any(&["공무원", "인턴"]) {
        return IncomeBracket::MiddleLow;
    }
    if contains_any(&["직장인", "회사원", "프리랜서"]) {
        return IncomeBracket::Middle;
    }
    if contains_any(&["전문직", "관리직"]) {
        return IncomeBracket::MiddleHigh;
    }
    if contains_any(&["임원", "의사", "변호사"]) {
        return IncomeBracket::High;
    }

    IncomeBracket::MiddleLow
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_input_defaults_to_middle() {
        assert_eq!(estimate(""), IncomeBracket::Middle);
        assert_eq!(estimate("   "), IncomeBracket::Middle);
    }

    #[test]
    fn test_occupation_table() {
        assert_eq!(estimate("구직자/실업자"), IncomeBracket::Low);
        assert_eq!(estimate("고등학생"), IncomeBracket::Low);
        assert_eq!(estimate("대학생/대학원생"), IncomeBracket::MiddleLow);
        assert_eq!(estimate("농업인"), IncomeBracket::Middle);
        assert_eq!(estimate("근로자/직장인"), IncomeBracket::MiddleHigh);
    }

    #[test]
    fn test_business_type_table() {
        assert_eq!(estimate("생계곤란/폐업예정자"), IncomeBracket::Low);
        assert_eq!(estimate("예비창업자"), IncomeBracket::MiddleLow);
        assert_eq!(estimate("음식업"), IncomeBracket::MiddleLow);
        assert_eq!(estimate("영업중"), IncomeBracket::Middle);
        assert_eq!(estimate("제조업"), IncomeBracket::MiddleHigh);
        assert_eq!(estimate("중소기업"), IncomeBracket::MiddleHigh);
        assert_eq!(estimate("정보통신업"), IncomeBracket::High);
        assert_eq!(estimate("사회복지시설"), IncomeBracket::High);
    }

    #[test]
    fn test_generic_keyword_fallback() {
        // Not an exact tag, but contains a known keyword.
        assert_eq!(estimate("대학원 재학 학생"), IncomeBracket::Low);
        assert_eq!(estimate("9급 공무원"), IncomeBracket::MiddleLow);
        assert_eq!(estimate("IT 회사원"), IncomeBracket::Middle);
        assert_eq!(estimate("병원 의사"), IncomeBracket::High);
    }

    #[test]
    fn test_unknown_label_defaults_to_middle_low() {
        assert_eq!(estimate("우주비행사"), IncomeBracket::MiddleLow);
    }
}
