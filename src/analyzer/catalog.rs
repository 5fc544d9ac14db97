//! Static interest catalog and sentiment word lists
//!
//! Category order is significant: ranking ties are broken by the order
//! categories are defined here.

/// One interest category: match keywords and the gifts it maps to
pub struct Category {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub gifts: &'static [&'static str],
}

/// Interest categories in definition order
pub const CATEGORIES: &[Category] = &[
    Category {
        name: "科技",
        keywords: &["科技", "数码", "智能手表", "无线耳机", "平板电脑", "智能音箱"],
        gifts: &["智能手表", "无线耳机", "平板电脑", "智能音箱"],
    },
    Category {
        name: "游戏",
        keywords: &["游戏", "电竞", "游戏机", "游戏周边", "游戏礼品卡", "游戏手柄"],
        gifts: &["游戏机", "游戏周边", "游戏礼品卡", "游戏手柄"],
    },
    Category {
        name: "音乐",
        keywords: &["音乐", "演唱会", "音乐会门票", "蓝牙音箱", "乐器"],
        gifts: &["音乐会门票", "蓝牙音箱", "音乐订阅服务", "乐器"],
    },
    Category {
        name: "美食",
        keywords: &["美食", "烹饪", "咖啡", "美食礼券", "精品茶具"],
        gifts: &["美食礼券", "烹饪工具", "精品茶具", "咖啡器具"],
    },
    Category {
        name: "运动",
        keywords: &["运动", "健身", "运动手环", "运动装备", "运动鞋"],
        gifts: &["运动手环", "运动装备", "健身器材", "运动鞋"],
    },
    Category {
        name: "读书",
        keywords: &["读书", "阅读", "电子书阅读器", "精装图书", "书签"],
        gifts: &["电子书阅读器", "精装图书", "读书订阅", "书签"],
    },
    Category {
        name: "艺术",
        keywords: &["艺术", "绘画", "摄影", "手工艺品", "相机"],
        gifts: &["艺术画作", "手工艺品", "相机", "绘画工具"],
    },
    Category {
        name: "时尚",
        keywords: &["时尚", "穿搭", "品牌包包", "饰品", "香水"],
        gifts: &["品牌包包", "饰品", "香水", "时尚配件"],
    },
];

/// Each substring hit adds +1 to a post's sentiment contribution
pub const POSITIVE_WORDS: &[&str] = &["喜欢", "爱", "好", "棒", "赞", "享受", "期待", "感恩"];

/// Each substring hit subtracts 1
pub const NEGATIVE_WORDS: &[&str] = &["讨厌", "烦", "差", "糟", "失望", "难过", "生气"];

/// Fallback recommendations when no interest surfaces at all
pub const GENERIC_GIFTS: &[&str] = &["通用礼品卡", "精美礼品盒", "手工巧克力"];

/// Look up a category by display name
pub fn category_by_name(name: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.name == name)
}
