//! Static diagnosis catalog.
//!
//! Every [`DiagnosisCategory`] maps to exactly one [`DiagnosisRecord`] with
//! four products. The table is immutable process-wide data; [`lookup`] is
//! exhaustive over the enum, so adding a category fails to compile until its
//! record exists.

use crate::models::{DiagnosisCategory, DiagnosisRecord, ProductRecord};

const fn product(
    name: &'static str,
    image_reference: &'static str,
    purchase_url: &'static str,
) -> ProductRecord {
    ProductRecord {
        name,
        image_reference,
        purchase_url,
    }
}

static ACNE_AND_PIMPLES: DiagnosisRecord = DiagnosisRecord {
    title: "Acne and Pimples",
    symptoms: "Blackheads, whiteheads, inflamed pimples.",
    products: [
        product(
            "Salicylic Acid Cleanser",
            "Cleanser",
            "https://www.korendy.com.tr/products/cosrx-salicylic-acid-daily-gentle-cleanser",
        ),
        product(
            "Spot Treatment",
            "SpotTreatment",
            "https://www.trendyol.com/la-roche-posay/effaclar-duo-m-cilt-bakim-kremi-40ml",
        ),
        product(
            "Tea Tree Oil Serum",
            "TeaTreeOilSerum",
            "https://www.korendy.com.tr/products/dr-ceuracle-tea-tree-purifine-95-essence",
        ),
        product(
            "Moisturizer",
            "moisturizers",
            "https://www.dermoeczanem.com/cerave-yaglanma-karsiti-nemlendirici-yuz-kremi-52-ml",
        ),
    ],
};

static DRYNESS: DiagnosisRecord = DiagnosisRecord {
    title: "Dryness and Dehydration",
    symptoms: "Flaky skin, tightness.",
    products: [
        product(
            "Hyaluronic Acid Serum",
            "Hyaluronic acid serum",
            "https://www.trendyol.com/la-roche-posay/hyalu-b5-dolgunlastirici-serum-hassas-ciltiler-icin-30-ml-p-35814733",
        ),
        product(
            "Moisturizers With Ceramides",
            "Moisturizers with ceramides",
            "https://www.dermoeczanem.com/cerave-nemlendirici",
        ),
        product(
            "Intensive Hydration Masks",
            "Intensive hydration masks",
            "https://www.sephora.com.tr/p/drink-up-intensive-overnight---avokadolu-nemlendirici-maske-P10050390.html",
        ),
        product(
            "Gentle Cleansers (sulfate-free)",
            "Gentle cleansers (sulfate-free)",
            "https://www.trendyol.com/la-roche-posay/toleriane-caring-wash-400ml-p-2543665",
        ),
    ],
};

static DARK_SPOTS: DiagnosisRecord = DiagnosisRecord {
    title: "Dark Spots and Hyperpigmentation",
    symptoms: "Dark spots, uneven skin tone.",
    products: [
        product(
            "Vitamin C Serum",
            "Vitamin C serum",
            "https://www.trendyol.com/la-roche-posay/pure-vitamin-c10-c-vitamin-icerikli-isilti-veren-serum-30ml-p-82732248",
        ),
        product(
            "Product With Niacinamide",
            "Product with niacinamide",
            "https://www.dermoeczanem.com/cosrx-galactomyces-maya-mantari-ozlu-cilt-tonu-esitlemeye-yardimci-serum-100-ml",
        ),
        product(
            "Spot Correctors With Alpha Arbutin",
            "Spot correctors with alpha arbutin",
            "https://www.trendyol.com/the-ordinary/alpha-arbutin-2-ha-p-28309809",
        ),
        product(
            "Sunscreen (SPF 30 or higher)",
            "Sunscreens (SPF 30 or higher)",
            "https://www.trendyol.com/la-roche-posay/anthelios-xl-spf-50-dry-touch-yagli-ciltler-icin-matlastirici-parfumsuz-yuz-gunes-kremi-50-ml-p-737514859",
        ),
    ],
};

static SENSITIVITY: DiagnosisRecord = DiagnosisRecord {
    title: "Sensitivity and Redness",
    symptoms: "Redness, irritation, and burning.",
    products: [
        product(
            "Azelaic Acid",
            "Azelaic acid product",
            "https://www.trendyol.com/the-ordinary/azelaic-acid-suspension-10-30ml-p-6707048",
        ),
        product(
            "Soothing Toner",
            "Soothing toner",
            "https://www.sephora.com.tr/p/aloe-vera-toner-P3607080.html",
        ),
        product(
            "Mineral-based Sunscreen",
            "Mineral-based sunscreen",
            "https://www.dermoeczanem.com/avene-mineral-sivi-gunes-kremi-spf-50-40-ml",
        ),
        product(
            "Moisturizer With Probiotics",
            "Moisturizer with probiotics",
            "https://miseca.com/products/prebiyotik-nemlendirici-krem",
        ),
    ],
};

static OILY_SKIN: DiagnosisRecord = DiagnosisRecord {
    title: "Oily Skin and Shine",
    symptoms: "Excess sebum, enlarged pores.",
    products: [
        product(
            "Clay Mask (kaolin-based)",
            "Clay mask(kaolin-based)",
            "https://www.origins.com.tr/product/15346/62429/cilt-bakimi/bakim/maskeler/original-skintm/arndrc-puruzsuzlestirici-hassas-kil-maskesi",
        ),
        product(
            "Cleanser With Salicylic Acid",
            "Cleanser with salicylic acid",
            "https://www.korendy.com.tr/products/cosrx-salicylic-acid-daily-gentle-cleanser",
        ),
        product(
            "Lightweight Gel Moisturizer",
            "Lightweight gel moisturizer",
            "https://www.trendyol.com/clinique/dramt-diff-hydrating-jelly-125-ml-p-4827049",
        ),
        product(
            "Oil-Controlling Toner (witch hazel)",
            "Oil-controlling toners(witch hazel)",
            "https://www.trendyol.com/sirenol/natural-cadi-findigi-cilt-sikilastirici-gozenek-temizleyici-tonik-300-ml-p-33993054",
        ),
    ],
};

static LINES_WRINKLES: DiagnosisRecord = DiagnosisRecord {
    title: "Fine Lines and Wrinkles",
    symptoms: "Loss of elasticity, signs of aging.",
    products: [
        product(
            "Antioxidant-rich Product",
            "Antioxidant-rich product",
            "https://www.kiehls.com.tr/midnight-recovery-concentrate-p-11148",
        ),
        product(
            "Collagen-boosting Mask",
            "Collagen-boosting mask",
            "https://www.kikomilano.com.tr/new-bright-lift-mask/",
        ),
        product(
            "Moisturizer With Peptides",
            "Moisturizer with peptides",
            "https://www.origins.com.tr/product/15917/128043/tum-urunler/youthtopatm-elma-ozu-ve-peptit-iceren-dolgunlastrc-krem/antioksidan-acsndan-zengin-peptit-iceren-nemlendirici",
        ),
        product(
            "Retinol Serum",
            "Retinol serum",
            "https://www.dermoeczanem.com/la-roche-posay-retinol-b3-yaslanma-ve-kirisiklik-karsiti-serum-30-ml",
        ),
    ],
};

static PORE_ISSUES: DiagnosisRecord = DiagnosisRecord {
    title: "Pore Issues",
    symptoms: "Enlarged or clogged pores.",
    products: [
        product(
            "Clay Mask",
            "Clay mask",
            "https://www.dermoeczanem.com/caudalie-instant-detox-mask-75-ml",
        ),
        product(
            "Lightweight Moisturizer",
            "lightweight moisturizer",
            "https://www.clinique.com.tr/product/1687/5047/cilt-bakimi/yuz-nemlendirici/dramatically-different-nemlendirici-jel-krem",
        ),
        product(
            "Pore-refining Serum",
            "Pore-refining serum",
            "https://www.dermoeczanem.com/bioderma-sebium-pore-refiner-krem-30ml",
        ),
        product(
            "Toner With BHA",
            "Toner with BHA",
            "https://www.trendyol.com/cosrx/aha-bha-clarifying-treatment-toner-aha-bha-iceren-arindirici-tonik-p-2870701",
        ),
    ],
};

/// Display text and products for `category`.
#[must_use]
pub fn lookup(category: DiagnosisCategory) -> &'static DiagnosisRecord {
    match category {
        DiagnosisCategory::AcneAndPimples => &ACNE_AND_PIMPLES,
        DiagnosisCategory::Dryness => &DRYNESS,
        DiagnosisCategory::DarkSpots => &DARK_SPOTS,
        DiagnosisCategory::Sensitivity => &SENSITIVITY,
        DiagnosisCategory::OilySkin => &OILY_SKIN,
        DiagnosisCategory::LinesWrinkles => &LINES_WRINKLES,
        DiagnosisCategory::PoreIssues => &PORE_ISSUES,
    }
}

/// All catalog entries in category declaration order.
pub fn entries() -> impl Iterator<Item = (DiagnosisCategory, &'static DiagnosisRecord)> {
    DiagnosisCategory::ALL
        .into_iter()
        .map(|category| (category, lookup(category)))
}
