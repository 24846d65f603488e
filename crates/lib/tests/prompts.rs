//! # Prompt Construction Tests
//!
//! These tests validate that campaign requests render into prompts with the
//! right campaign-type brief, that form fields are interpolated verbatim,
//! and that the influencer roster is echoed one object per record.

use adforge::prompts::campaign::{
    build_image_prompt, build_plan_prompt, PLAN_OUTPUT_FORMAT, ROSTER_SECTION_HEADER,
};
use adforge::roster::{echo_block, InfluencerRecord, NO_INFLUENCER_DATA};
use adforge::types::{CampaignBrief, CampaignRequest};

fn sample_brief() -> CampaignBrief {
    CampaignBrief {
        describe_business: "Artisanal coffee roastery".to_string(),
        industry: "Food & Beverage".to_string(),
        timeframe_start: "2024-01-01".to_string(),
        timeframe_end: "2024-02-01".to_string(),
        platforms: "Instagram, TikTok".to_string(),
    }
}

fn sample_roster() -> Vec<InfluencerRecord> {
    vec![
        InfluencerRecord {
            name: "Ada".to_string(),
            username: "@ada".to_string(),
            platform: "Instagram".to_string(),
            location: "Bangkok".to_string(),
            followers: "12000".to_string(),
            engagement_rate: "4.2%".to_string(),
        },
        InfluencerRecord {
            name: "Brix".to_string(),
            username: "@brix".to_string(),
            platform: "TikTok".to_string(),
            location: "Chiang Mai".to_string(),
            followers: "88000".to_string(),
            engagement_rate: "7.9%".to_string(),
        },
    ]
}

/// The rendered prompt must start with the output-schema block and end with
/// the roster section.
#[test]
fn test_prompt_has_schema_brief_and_roster_sections() {
    let request = CampaignRequest::Custom {
        brief: sample_brief(),
        campaign_goal: "Win local fans".to_string(),
    };
    let roster_block = echo_block(&sample_roster());
    let prompt = build_plan_prompt(&request, &roster_block);

    assert!(prompt.starts_with(PLAN_OUTPUT_FORMAT));
    assert!(prompt.contains("# Campaign Brief"));
    assert!(prompt.contains(ROSTER_SECTION_HEADER));
    assert!(prompt.ends_with(&roster_block));
}

/// Every amplify field must appear verbatim in the rendered prompt.
#[test]
fn test_amplify_fields_are_interpolated_verbatim() {
    let request = CampaignRequest::Amplify {
        brief: sample_brief(),
        market_trends: "home brewing".to_string(),
        target_audience: "Gen Z".to_string(),
        brand_usp: "single-origin beans".to_string(),
    };
    let prompt = build_plan_prompt(&request, NO_INFLUENCER_DATA);

    assert!(prompt.contains("# Campaign Brief: Amplify Brand Awareness"));
    assert!(prompt.contains("Artisanal coffee roastery"));
    assert!(prompt.contains("Food & Beverage"));
    assert!(prompt.contains("2024-01-01 to 2024-02-01"));
    assert!(prompt.contains("Instagram, TikTok"));
    assert!(prompt.contains("home brewing"));
    assert!(prompt.contains("Gen Z"));
    assert!(prompt.contains("single-origin beans"));
    // No unfilled placeholders may survive rendering.
    assert!(!prompt.contains("{describe_business}"));
    assert!(!prompt.contains("{market_trends}"));
}

/// Each campaign type must select its own brief heading and interpolate its
/// type-specific fields verbatim.
#[test]
fn test_each_campaign_type_selects_its_brief() {
    let cases: Vec<(CampaignRequest, &str, &[&str])> = vec![
        (
            CampaignRequest::MarketProduct {
                brief: sample_brief(),
                product_name: "Cold Brew Kit".to_string(),
                product_details: "Steeps overnight".to_string(),
                product_usp: "No equipment needed".to_string(),
            },
            "# Campaign Brief: Market a Product",
            &["Cold Brew Kit", "Steeps overnight", "No equipment needed"],
        ),
        (
            CampaignRequest::DriveSales {
                brief: sample_brief(),
                promotional_offers: "2-for-1 January".to_string(),
                sales_target: "500 units".to_string(),
            },
            "# Campaign Brief: Drive Sales",
            &["2-for-1 January", "500 units"],
        ),
        (
            CampaignRequest::FindNewCustomers {
                brief: sample_brief(),
                current_audience: "Office workers".to_string(),
                desired_audience: "Students".to_string(),
            },
            "# Campaign Brief: Find New Customers",
            &["Office workers", "Students"],
        ),
        (
            CampaignRequest::DriveEventAwareness {
                brief: sample_brief(),
                event_name: "Latte Art Throwdown".to_string(),
                event_details: "Monthly barista contest".to_string(),
                event_date: "2024-01-20".to_string(),
            },
            "# Campaign Brief: Drive Event Awareness",
            &["Latte Art Throwdown", "Monthly barista contest", "2024-01-20"],
        ),
    ];

    for (request, heading, fields) in cases {
        let prompt = build_plan_prompt(&request, NO_INFLUENCER_DATA);
        assert!(
            prompt.contains(heading),
            "expected {:?} prompt to contain {heading:?}",
            request.kind_tag()
        );
        for field in fields {
            assert!(
                prompt.contains(field),
                "expected {:?} prompt to contain {field:?}",
                request.kind_tag()
            );
        }
    }
}

/// Blank optional fields must render without panicking and leave no
/// placeholder behind.
#[test]
fn test_all_blank_fields_render_cleanly() {
    let request = CampaignRequest::Amplify {
        brief: CampaignBrief::default(),
        market_trends: String::new(),
        target_audience: String::new(),
        brand_usp: String::new(),
    };
    let prompt = build_plan_prompt(&request, NO_INFLUENCER_DATA);

    assert!(!prompt.contains("{describe_business}"));
    assert!(!prompt.contains("{brand_usp}"));
    assert!(prompt.contains("- Business: \n"));
}

/// A roster of N records must render exactly N echo objects, each carrying
/// the verbatim record fields plus the recommendation instruction.
#[test]
fn test_roster_echoes_one_object_per_record() {
    let roster = sample_roster();
    let block = echo_block(&roster);

    assert_eq!(block.lines().count(), roster.len());
    assert_eq!(block.matches("recommendedCollab").count(), roster.len());
    assert!(block.contains("\"@ada\""));
    assert!(block.contains("\"88000\""));
    assert!(block.contains("\"engagementRate\":\"7.9%\""));
}

/// An empty roster renders the no-data sentinel.
#[test]
fn test_empty_roster_renders_sentinel() {
    assert_eq!(echo_block(&[]), NO_INFLUENCER_DATA);
}

/// The image prompt embeds the business context and the suggestion text.
#[test]
fn test_image_prompt_embeds_context_and_suggestion() {
    let request = CampaignRequest::Custom {
        brief: sample_brief(),
        campaign_goal: String::new(),
    };
    let prompt = build_image_prompt(&request, "Bean-to-cup timelapse reel");

    assert!(prompt.contains("Artisanal coffee roastery"));
    assert!(prompt.contains("Food & Beverage"));
    assert!(prompt.contains("Bean-to-cup timelapse reel"));
    assert!(!prompt.contains("{suggestion}"));
}
