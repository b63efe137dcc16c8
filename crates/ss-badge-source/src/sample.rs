//! Built-in sample data for the gallery, leaderboard and profile pages.

use ss_api_types::{BadgeInfo, LeaderboardEntry, Profile};

fn badge(id: &str, name: &str, description: &str, date: &str, category: &str, level: &str) -> BadgeInfo {
    BadgeInfo {
        id: id.to_owned(),
        name: name.to_owned(),
        description: description.to_owned(),
        image: String::new(),
        date: date.to_owned(),
        category: category.to_owned(),
        level: level.to_owned(),
        ..BadgeInfo::default()
    }
}

/// The three badges every demo wallet starts with.
pub fn demo_badges() -> Vec<BadgeInfo> {
    gallery_badges().into_iter().take(3).collect()
}

pub fn gallery_badges() -> Vec<BadgeInfo> {
    vec![
        badge(
            "1",
            "Web3 Developer",
            "Verified skills in blockchain development and smart contracts",
            "2023-06-15",
            "Development",
            "Intermediate",
        ),
        badge(
            "2",
            "Smart Contract Auditor",
            "Expert in reviewing and securing smart contracts",
            "2023-07-22",
            "Security",
            "Advanced",
        ),
        badge(
            "3",
            "DeFi Specialist",
            "Mastery in decentralized finance protocols and mechanisms",
            "2023-08-05",
            "Finance",
            "Expert",
        ),
        badge(
            "4",
            "NFT Creator",
            "Skilled in creating and deploying NFT collections",
            "2023-09-12",
            "Art",
            "Intermediate",
        ),
        badge(
            "5",
            "DAO Governor",
            "Active participant in decentralized autonomous organizations",
            "2023-10-18",
            "Governance",
            "Advanced",
        ),
        badge(
            "6",
            "Blockchain Architect",
            "Designed scalable blockchain solutions and infrastructures",
            "2023-11-30",
            "Architecture",
            "Expert",
        ),
        badge(
            "7",
            "Solidity Developer",
            "Proficient in writing secure Solidity smart contracts",
            "2023-12-05",
            "Development",
            "Intermediate",
        ),
        badge(
            "8",
            "Tokenomics Expert",
            "Specialist in designing token economic models",
            "2023-12-18",
            "Finance",
            "Advanced",
        ),
    ]
}

pub fn leaderboard() -> Vec<LeaderboardEntry> {
    let rows: [(&str, &str, u32, i32); 8] = [
        ("Alex Johnson", "0x742d...8f3c", 12, 0),
        ("Sam Chen", "0xa83f...2b1d", 9, 1),
        ("Maria Garcia", "0xf2c1...9e4a", 8, -1),
        ("Jordan Smith", "0x3d9b...1c7e", 7, 2),
        ("Taylor Kim", "0x6e44...a2f8", 6, 0),
        ("Casey Brown", "0xb7d2...5c3f", 5, -2),
        ("Riley Davis", "0x2c8a...7d9b", 4, 1),
        ("Morgan Wilson", "0x9f1e...4a6c", 3, 0),
    ];

    rows.iter()
        .enumerate()
        .map(|(index, (name, wallet, badge_count, change))| LeaderboardEntry {
            id: (index + 1).to_string(),
            name: (*name).to_owned(),
            wallet: (*wallet).to_owned(),
            badge_count: *badge_count,
            rank: index as u32 + 1,
            change: *change,
        })
        .collect()
}

pub fn profile() -> Profile {
    Profile {
        name: "Alex Johnson".to_owned(),
        bio: "Web3 developer passionate about blockchain technology and decentralized applications. \
              Currently working on NFT marketplaces and DeFi protocols."
            .to_owned(),
        website: "https://alexjohnson.dev".to_owned(),
        twitter: "@alexjohnson".to_owned(),
        linkedin: "alexjohnson".to_owned(),
        github: "alexjohnson".to_owned(),
        join_date: "2023-06-01".to_owned(),
    }
}
