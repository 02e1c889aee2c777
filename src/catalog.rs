use serde::Serialize;

/// A selectable model persona. `descriptor` is the phrase inserted verbatim
/// into the generation instruction; `thumbnail` is a preview asset for the
/// picker step.
#[derive(Debug, Clone, Serialize)]
pub struct PersonaOption {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub thumbnail: &'static str,
    pub descriptor: &'static str,
}

/// A selectable background scene.
#[derive(Debug, Clone, Serialize)]
pub struct SceneOption {
    pub id: &'static str,
    pub label: &'static str,
    pub thumbnail: &'static str,
    pub descriptor: &'static str,
}

pub static PERSONAS: [PersonaOption; 8] = [
    PersonaOption {
        id: "nu_tre",
        label: "Nữ Trẻ",
        description: "Người mẫu nữ Việt Nam trẻ trung",
        thumbnail: "https://picsum.photos/seed/female_young/400/500",
        descriptor: "a young beautiful Vietnamese female fashion model",
    },
    PersonaOption {
        id: "nu_trung_nien",
        label: "Nữ Trung Niên",
        description: "Người mẫu nữ Việt Nam trung niên",
        thumbnail: "https://picsum.photos/seed/female_middle/400/500",
        descriptor: "a sophisticated middle-aged Vietnamese female fashion model",
    },
    PersonaOption {
        id: "nam_tre",
        label: "Nam Trẻ",
        description: "Người mẫu nam Việt Nam trẻ trung",
        thumbnail: "https://picsum.photos/seed/male_young/400/500",
        descriptor: "a handsome young Vietnamese male fashion model",
    },
    PersonaOption {
        id: "nam_trung_nien",
        label: "Nam Trung Niên",
        description: "Người mẫu nam Việt Nam trung niên",
        thumbnail: "https://picsum.photos/seed/male_middle/400/500",
        descriptor: "a mature middle-aged Vietnamese male fashion model",
    },
    PersonaOption {
        id: "be_trai",
        label: "Bé Trai",
        description: "Người mẫu nhí nam",
        thumbnail: "https://picsum.photos/seed/boy/400/500",
        descriptor: "a cute Vietnamese young boy model",
    },
    PersonaOption {
        id: "be_gai",
        label: "Bé Gái",
        description: "Người mẫu nhí nữ",
        thumbnail: "https://picsum.photos/seed/girl/400/500",
        descriptor: "a cute Vietnamese young girl model",
    },
    PersonaOption {
        id: "ba_lao",
        label: "Bà Lão 60",
        description: "Người mẫu nữ cao tuổi",
        thumbnail: "https://picsum.photos/seed/elder_woman/400/500",
        descriptor: "a graceful 60-year-old Vietnamese elderly woman model",
    },
    PersonaOption {
        id: "ong_lao",
        label: "Ông Lão 60",
        description: "Người mẫu nam cao tuổi",
        thumbnail: "https://picsum.photos/seed/elder_man/400/500",
        descriptor: "a dignified 60-year-old Vietnamese elderly man model",
    },
];

pub static SCENES: [SceneOption; 16] = [
    SceneOption {
        id: "street",
        label: "Ngoài Phố Việt Nam",
        thumbnail: "https://picsum.photos/seed/vn_street/500/300",
        descriptor: "busy vibrant Vietnamese street scene with motorbikes and urban architecture",
    },
    SceneOption {
        id: "studio",
        label: "Studio Chuyên Nghiệp",
        thumbnail: "https://picsum.photos/seed/studio/500/300",
        descriptor: "minimalist professional fashion photography studio with soft lighting",
    },
    SceneOption {
        id: "live_nam",
        label: "Phòng Live Stream Nam",
        thumbnail: "https://picsum.photos/seed/live_male/500/300",
        descriptor: "modern brightly lit fashion livestream room for men with professional equipment",
    },
    SceneOption {
        id: "live_nu",
        label: "Phòng Live Stream Nữ",
        thumbnail: "https://picsum.photos/seed/live_female/500/300",
        descriptor: "aesthetic fashion livestream room for women with ring lights and decor",
    },
    SceneOption {
        id: "store_nam",
        label: "Cửa Hàng Thời Trang Nam",
        thumbnail: "https://picsum.photos/seed/store_male/500/300",
        descriptor: "high-end luxury men clothing store interior",
    },
    SceneOption {
        id: "store_nu",
        label: "Cửa Hàng Thời Trang Nữ",
        thumbnail: "https://picsum.photos/seed/store_female/500/300",
        descriptor: "elegant boutique women fashion store interior",
    },
    SceneOption {
        id: "living",
        label: "Phòng Khách",
        thumbnail: "https://picsum.photos/seed/living_room/500/300",
        descriptor: "stylish modern Vietnamese apartment living room",
    },
    SceneOption {
        id: "kitchen",
        label: "Nhà Bếp",
        thumbnail: "https://picsum.photos/seed/kitchen/500/300",
        descriptor: "contemporary luxury kitchen interior",
    },
    SceneOption {
        id: "bedroom",
        label: "Phòng Ngủ",
        thumbnail: "https://picsum.photos/seed/bedroom/500/300",
        descriptor: "cozy elegant modern bedroom interior with soft bedding and warm natural lighting",
    },
    SceneOption {
        id: "mall",
        label: "Trung Tâm Mua Sắm",
        thumbnail: "https://picsum.photos/seed/mall/500/300",
        descriptor: "luxurious shopping mall with glass and light",
    },
    SceneOption {
        id: "cafe",
        label: "Quán Cà Phê",
        thumbnail: "https://picsum.photos/seed/cafe/500/300",
        descriptor: "trendy aesthetic Vietnamese coffee shop with wooden decor",
    },
    SceneOption {
        id: "school",
        label: "Trường Học",
        thumbnail: "https://picsum.photos/seed/school/500/300",
        descriptor: "modern university campus background",
    },
    SceneOption {
        id: "office",
        label: "Văn Phòng",
        thumbnail: "https://picsum.photos/seed/office/500/300",
        descriptor: "professional sleek modern office background",
    },
    SceneOption {
        id: "lotus",
        label: "Đầm Sen",
        thumbnail: "https://picsum.photos/seed/lotus/500/300",
        descriptor: "traditional Vietnamese lotus pond with pink flowers and green leaves",
    },
    SceneOption {
        id: "field",
        label: "Cánh Đồng",
        thumbnail: "https://picsum.photos/seed/field/500/300",
        descriptor: "serene Vietnamese rice field at sunset",
    },
    SceneOption {
        id: "market",
        label: "Ngoài Chợ",
        thumbnail: "https://picsum.photos/seed/market/500/300",
        descriptor: "bustling traditional Vietnamese local market",
    },
];

pub fn persona(id: &str) -> Option<&'static PersonaOption> {
    PERSONAS.iter().find(|p| p.id == id)
}

pub fn scene(id: &str) -> Option<&'static SceneOption> {
    SCENES.iter().find(|s| s.id == id)
}

pub fn default_persona() -> &'static PersonaOption {
    &PERSONAS[0]
}

pub fn default_scene() -> &'static SceneOption {
    &SCENES[0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn persona_ids_are_unique() {
        let ids: HashSet<_> = PERSONAS.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), PERSONAS.len());
    }

    #[test]
    fn scene_ids_are_unique() {
        let ids: HashSet<_> = SCENES.iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), SCENES.len());
    }

    #[test]
    fn lookup_resolves_known_ids_only() {
        assert!(persona("nu_tre").is_some());
        assert!(scene("studio").is_some());
        assert!(persona("studio").is_none());
        assert!(scene("nu_tre").is_none());
        assert!(persona("").is_none());
    }

    #[test]
    fn defaults_are_the_first_entries() {
        assert_eq!(default_persona().id, PERSONAS[0].id);
        assert_eq!(default_scene().id, SCENES[0].id);
    }
}
