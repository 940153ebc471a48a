//! Charities loaded into the directory at startup.

use crate::domain::entities::{Category, NewCharity};

struct SeedCharity {
    name: &'static str,
    description: &'static str,
    website: &'static str,
    category: Category,
    focus_area: &'static str,
    featured: bool,
}

const SEED: &[SeedCharity] = &[
    SeedCharity {
        name: "Islamic Relief USA",
        description: "One of the largest Islamic charities in the US, providing emergency relief, development programs, and advocacy for Palestinians and other communities worldwide.",
        website: "https://www.islamicreliefusa.org",
        category: Category::Muslim,
        focus_area: "Emergency Relief",
        featured: false,
    },
    SeedCharity {
        name: "Zakat Foundation of America",
        description: "Dedicated to alleviating poverty and suffering through emergency relief, development programs, and education initiatives in Palestine and globally.",
        website: "https://www.zakat.org",
        category: Category::Muslim,
        focus_area: "Development Programs",
        featured: false,
    },
    SeedCharity {
        name: "Human Appeal International",
        description: "International charity providing sustainable development, emergency relief, and advocacy work with a strong focus on Palestinian territories.",
        website: "https://www.humanappeal.org",
        category: Category::Muslim,
        focus_area: "Sustainable Development",
        featured: false,
    },
    SeedCharity {
        name: "Penny Appeal",
        description: "UK-based Muslim charity providing emergency relief, water projects, and humanitarian aid to Palestinian communities in Gaza and the West Bank.",
        website: "https://www.pennyappeal.org",
        category: Category::Muslim,
        focus_area: "Emergency Relief",
        featured: true,
    },
    SeedCharity {
        name: "Muslim Aid",
        description: "International relief and development organization providing emergency assistance, healthcare, and education support in Palestinian territories.",
        website: "https://www.muslimaid.org",
        category: Category::Muslim,
        focus_area: "Development Programs",
        featured: false,
    },
    SeedCharity {
        name: "Islamic Society of North America Relief",
        description: "Providing humanitarian aid and emergency relief to Palestinian families through Islamic principles of charity and compassion.",
        website: "https://www.isnarelief.org",
        category: Category::Muslim,
        focus_area: "Humanitarian Aid",
        featured: false,
    },
    SeedCharity {
        name: "Helping Hand for Relief and Development",
        description: "International Muslim charity focused on emergency relief, medical aid, and sustainable development projects in Gaza.",
        website: "https://www.hhrd.org",
        category: Category::Muslim,
        focus_area: "Medical Aid",
        featured: false,
    },
    SeedCharity {
        name: "Palestine Children's Relief Fund",
        description: "Dedicated to providing medical care and humanitarian aid specifically to Palestinian children, with extensive operations in Gaza.",
        website: "https://www.pcrf.net",
        category: Category::Gaza,
        focus_area: "Pediatric Care",
        featured: false,
    },
    SeedCharity {
        name: "Gaza Emergency Appeal",
        description: "Emergency response fund providing immediate relief including food, medical supplies, and shelter assistance to families in Gaza.",
        website: "https://www.gazaemergencyappeal.org",
        category: Category::Gaza,
        focus_area: "Emergency Relief",
        featured: false,
    },
    SeedCharity {
        name: "Gaza Reconstruction Fund",
        description: "Focused on rebuilding infrastructure, homes, and essential services in Gaza, supporting long-term recovery and development.",
        website: "https://www.gazareconstruction.org",
        category: Category::Gaza,
        focus_area: "Reconstruction",
        featured: false,
    },
    SeedCharity {
        name: "Palestine Red Crescent Society",
        description: "Leading medical emergency response organization providing ambulance services, emergency care, and medical aid throughout Palestinian territories.",
        website: "https://www.palestinercs.org",
        category: Category::Medical,
        focus_area: "Emergency Medical",
        featured: false,
    },
    SeedCharity {
        name: "Medical Aid for Palestinians",
        description: "UK-based charity providing medical aid, training, and capacity building for healthcare systems in Palestinian territories.",
        website: "https://www.map.org.uk",
        category: Category::Medical,
        focus_area: "Healthcare Training",
        featured: false,
    },
    SeedCharity {
        name: "Gaza Medical Relief",
        description: "Focused on providing essential medications, medical equipment, and surgical supplies to hospitals and clinics in Gaza.",
        website: "https://www.gazamedicalrelief.org",
        category: Category::Medical,
        focus_area: "Medical Supplies",
        featured: false,
    },
    SeedCharity {
        name: "Al-Khair Foundation",
        description: "International Muslim charity providing emergency relief, clean water projects, and medical aid to Palestinian communities.",
        website: "https://www.alkhair.org",
        category: Category::Muslim,
        focus_area: "Water Projects",
        featured: false,
    },
    SeedCharity {
        name: "Ummah Welfare Trust",
        description: "UK-based Islamic charity specializing in emergency relief and development projects in Palestinian territories.",
        website: "https://www.uwt.org",
        category: Category::Muslim,
        focus_area: "Emergency Relief",
        featured: false,
    },
    SeedCharity {
        name: "Muslim Hands",
        description: "International relief organization providing humanitarian aid, medical assistance, and sustainable development in Gaza.",
        website: "https://www.muslimhands.org.uk",
        category: Category::Muslim,
        focus_area: "Humanitarian Aid",
        featured: false,
    },
];

/// Returns the built-in directory listings in display order.
pub fn seed_charities() -> Vec<NewCharity> {
    SEED.iter()
        .map(|s| NewCharity {
            name: s.name.to_string(),
            description: s.description.to_string(),
            website: s.website.to_string(),
            category: s.category,
            focus_area: s.focus_area.to_string(),
            featured: s.featured,
        })
        .collect()
}
