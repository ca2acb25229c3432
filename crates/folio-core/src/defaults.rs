//! Seed content and defaults for new records.
//!
//! Record ids are generated on every call, so two default documents never
//! share ids.

use crate::ids::create_id;
use crate::node::{Node, Record};
use serde_json::{json, Value};

fn into_record(value: Value) -> Record {
    match Node::from(value) {
        Node::Record(map) => map,
        _ => Record::new(),
    }
}

fn metadata(entries: &[(&str, &str)]) -> Value {
    Value::Array(
        entries
            .iter()
            .map(|(label, value)| json!({"id": create_id("meta"), "label": label, "value": value}))
            .collect(),
    )
}

fn gallery(images: &[(String, &str)]) -> Value {
    Value::Array(
        images
            .iter()
            .map(|(src, alt)| json!({"id": create_id("image"), "src": src, "alt": alt}))
            .collect(),
    )
}

fn unsplash(photo: &str, width: u32) -> String {
    format!("https://images.unsplash.com/photo-{photo}?auto=format&fit=crop&w={width}&q=80")
}

/// Fields of a freshly added collection, before caller overrides.
pub fn new_collection_fields() -> Record {
    into_record(json!({
        "name": "New Collection",
        "description": "",
        "mood": "",
        "heroImage": ""
    }))
}

/// Fields of a freshly added project, before caller overrides.
pub fn new_project_fields() -> Record {
    into_record(json!({
        "title": "Untitled project",
        "tagline": "",
        "collectionId": null,
        "coverImage": "",
        "description": "",
        "gallery": [],
        "metadata": []
    }))
}

/// Fields of a freshly added contact entry, before caller overrides.
pub fn new_contact_entry_fields() -> Record {
    into_record(json!({
        "label": "",
        "value": "",
        "displayValue": "",
        "note": ""
    }))
}

/// The seed document shipped with the console.
pub fn default_sections() -> Record {
    let botanical = create_id("collection");
    let tidal = create_id("collection");
    let chromatic = create_id("collection");

    into_record(json!({
        "settings": {
            "adminPassword": "",
            "siteTitle": "Coral Dias",
            "logo": "",
            "watermarkEnabled": true,
            "watermarkText": "coraldias.co.uk",
            "watermarkOpacity": 0.12,
            "watermarkScale": 1
        },
        "home": {
            "eyebrow": "Surface pattern dias",
            "title": "Tailored fashion prints distilled from tidal botanica",
            "description": "Coral Dias is the print practice of Isla Marin, blending hand-painted botanicals, underwater photography, and experimental dye labs into couture-ready surfaces. Each commission braids ocean narratives with tactile color stories for runway, resort, and editorial collaborators.",
            "ribbonText": "Limited print editions",
            "primaryCta": {"label": "Explore portfolio", "href": "/portfolio"},
            "secondaryCta": {"label": "Meet the designer", "href": "/about"},
            "heroImage": unsplash("1521572267360-ee0c2909d518", 1600)
        },
        "contact": {
            "eyebrow": "Collaborate",
            "title": "Let's craft something unforgettable",
            "description": "Reach out directly for commissions, licensing conversations, or to follow my studio journals across the web.",
            "entries": [
                {
                    "id": create_id("contact"),
                    "label": "Email",
                    "value": "hello@coralatelier.studio"
                },
                {
                    "id": create_id("contact"),
                    "label": "Mobile",
                    "value": "+44 7700 900123",
                    "displayValue": "+44 7700 900123",
                    "note": "Available weekdays 9am – 5pm GMT"
                },
                {
                    "id": create_id("contact"),
                    "label": "LinkedIn",
                    "value": "https://www.linkedin.com/in/coraldias",
                    "note": "Studio process notes and project snapshots"
                },
                {
                    "id": create_id("contact"),
                    "label": "Instagram",
                    "value": "https://www.instagram.com/coral.prints",
                    "note": "Daily sketchbooks and underwater palettes"
                }
            ]
        },
        "about": {
            "eyebrow": "About Isla Marin",
            "title": "Printmaking rituals rooted in coastal botanics",
            "paragraphs": [
                "Isla Marin is a fashion print designer translating tidal ecosystems into tactile couture narratives. Her process begins with dawn dives and pressed specimens, then flows through gouache washes, analog collage, and digital compositing to orchestrate collections with luminous depth.",
                "Across bespoke textiles, limited edition scarves, and immersive runway projections, Isla layers coral-inspired palettes with experimental surface techniques. She collaborates with regenerative farms and artisanal mills to ensure every pattern supports circular material stories."
            ],
            "capabilities": [
                "Hand-painted and digital textile print suites",
                "Color story development & collection direction",
                "Lookbook art direction and motion treatments",
                "Custom illustration for resort, bridal, and ready-to-wear"
            ],
            "stats": [
                {"id": create_id("stat"), "value": "28", "label": "Runway capsules outfitted"},
                {"id": create_id("stat"), "value": "16", "label": "Editorial covers featuring her prints"},
                {"id": create_id("stat"), "value": "42", "label": "Botanical species catalogued for palettes"},
                {"id": create_id("stat"), "value": "12", "label": "Residencies at coastal design labs"}
            ]
        },
        "portfolio": {
            "introTitle": "Portfolio",
            "introDescription": "Signature projects spanning resort collections, couture collaborations, and artful product capsules. Select a collection to immerse in its layered imagery and tactile storytelling.",
            "filtersLabel": "Collections"
        },
        "collections": [
            {
                "id": botanical,
                "name": "Botanical Reverie",
                "description": "Velvet botanicals painted under moonlight, translated into sweeping gowns for celestial soirées.",
                "mood": "Opaline florals, midnight indigos, silver leaf",
                "heroImage": unsplash("1521572267360-ee0c2909d518", 1400)
            },
            {
                "id": tidal,
                "name": "Tidal Lumina",
                "description": "Liquid gradients inspired by tidepool refractions, crafted for resort silhouettes and silk separates.",
                "mood": "Iridescent teals, coral blush, sun-faded saffron",
                "heroImage": unsplash("1487412720507-e7ab37603c6f", 1400)
            },
            {
                "id": chromatic,
                "name": "Chromatic Echo",
                "description": "Architectural motifs echoing Art Deco coastlines, rendered in richly layered jacquards and prints.",
                "mood": "Gilded ochre, saltstone neutrals, obsidian ink",
                "heroImage": unsplash("1521572163474-6864f9cf17ab", 1400)
            }
        ],
        "projects": [
            {
                "id": create_id("project"),
                "title": "Moonlit Botanica",
                "tagline": "Gouache florals with luminescent foil veiling",
                "collectionId": botanical,
                "coverImage": unsplash("1503341455253-b2e723bb3dbb", 1200),
                "description": "A couture print story for Luna Atelier’s winter gala capsule. Each panel begins as midnight-hued gouache blooms layered with silver leaf impressions, then digitized for scale-play across gowns, gloves, and silk veils.",
                "gallery": gallery(&[
                    (unsplash("1521572163474-6864f9cf17ab", 1600), "Close-up of botanical print with metallic details"),
                    (unsplash("1475180098004-ca77a66827be", 1600), "Runway look featuring flowing floral gown"),
                    (unsplash("1487412947147-5cebf100ffc2", 1600), "Detail of layered petals on silk fabric")
                ]),
                "metadata": metadata(&[
                    ("Client", "Luna Dias"),
                    ("Year", "2024"),
                    ("Techniques", "Hand-painted gouache, foil stamping, digital overprint"),
                    ("Deliverables", "Runway textile suite, print bible, bespoke linings")
                ])
            },
            {
                "id": create_id("project"),
                "title": "Tidepool Tapestry",
                "tagline": "Gradient silks inspired by tidal refractions",
                "collectionId": tidal,
                "coverImage": unsplash("1487412720507-e7ab37603c6f", 1200),
                "description": "Resort capsule for Mare & Co. featuring cascading silk caftans, swimwear, and accessories. Isla captured tidepool light studies underwater, transforming them into layered gradients with hand-inked contour lines.",
                "gallery": gallery(&[
                    (unsplash("1529333166437-7750a6dd5a70", 1600), "Silk fabric with teal and coral gradient print"),
                    (unsplash("1487412947147-5cebf100ffc2", 1600), "Model wearing flowing printed resort wear"),
                    (unsplash("1487412720507-e7ab37603c6f", 1600), "Detail of layered watercolor strokes on textile")
                ]),
                "metadata": metadata(&[
                    ("Client", "Mare & Co."),
                    ("Year", "2023"),
                    ("Techniques", "Underwater photography, digital gradient mapping, silk-screen overlays"),
                    ("Deliverables", "Resort wear textile collection, swim accessories, lookbook direction")
                ])
            },
            {
                "id": create_id("project"),
                "title": "Chromatic Bloom",
                "tagline": "Architectural petals for avant-garde silhouettes",
                "collectionId": chromatic,
                "coverImage": unsplash("1499951360447-b19be8fe80f5", 1200),
                "description": "Collaboration with architect Lina Ortiz for a gallery installation merging structured garments and projected lightscapes. Isla translated Art Deco coastlines into geometric florals with stitched metallic threads.",
                "gallery": gallery(&[
                    (unsplash("1487412720507-e7ab37603c6f", 1600), "Geometric print swatches with metallic sheen"),
                    (unsplash("1521572163474-6864f9cf17ab", 1600), "Structured garment with bold angular pattern"),
                    (unsplash("1521572163474-6864f9cf17ab", 1600), "Projected light patterns over textile installation")
                ]),
                "metadata": metadata(&[
                    ("Client", "Lina Ortiz Studio"),
                    ("Year", "2022"),
                    ("Techniques", "Vector drafting, metallic thread embroidery, projection mapping"),
                    ("Deliverables", "Exhibition textiles, sculptural garments, motion projections")
                ])
            }
        ]
    }))
}
