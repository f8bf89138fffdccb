//! Keyword-count topic classification

use crate::types::Category;

/// Characters of body text considered after the title
pub const BODY_PREFIX_CHARS: usize = 500;

/// Category keyword table. Order matters: on equal scores the earlier row wins.
pub const KEYWORD_TABLE: &[(Category, &[&str])] = &[
    (
        Category::Politics,
        &["政治", "政府", "政策", "领导", "党", "国家", "外交", "会议", "决策", "治理"],
    ),
    (
        Category::Economy,
        &[
            "经济", "股市", "股指", "金融", "投资", "贸易", "GDP", "通胀", "银行", "企业", "上市", "板块", "涨幅", "交易",
        ],
    ),
    (
        Category::Technology,
        &["科技", "AI", "人工智能", "互联网", "5G", "芯片", "创新", "技术", "数字", "智能"],
    ),
    (
        Category::Society,
        &["社会", "民生", "教育", "医疗", "就业", "住房", "环境", "安全", "文化"],
    ),
    (
        Category::International,
        &["国际", "美国", "欧洲", "日本", "韩国", "俄罗斯", "全球", "世界"],
    ),
    (Category::Military, &["军事", "国防", "军队", "战争", "武器", "安全"]),
    (Category::Sports, &["体育", "比赛", "运动", "足球", "篮球", "奥运"]),
    (Category::Entertainment, &["娱乐", "明星", "电影", "音乐", "综艺", "演出"]),
    (Category::Health, &["健康", "医疗", "疫情", "病毒", "治疗", "药物"]),
    (Category::Education, &["教育", "学校", "大学", "招生", "考试", "学生"]),
];

/// Pick the best-scoring category for a title and body.
///
/// A category's score is the number of keyword occurrences in the title plus
/// the first [`BODY_PREFIX_CHARS`] characters of the body. Falls back to
/// [`Category::FALLBACK`] when nothing matches.
pub fn classify(title: &str, body: &str) -> Category {
    let text = analysis_text(title, body);

    let mut best = Category::FALLBACK;
    let mut best_score = 0;
    for (category, keywords) in KEYWORD_TABLE {
        let score = score_keywords(&text, keywords);
        // strict comparison keeps the earliest row on ties
        if score > best_score {
            best = *category;
            best_score = score;
        }
    }
    best
}

/// Per-category scores, in table order. Zero scores included.
pub fn category_scores(title: &str, body: &str) -> Vec<(Category, usize)> {
    let text = analysis_text(title, body);
    KEYWORD_TABLE
        .iter()
        .map(|(category, keywords)| (*category, score_keywords(&text, keywords)))
        .collect()
}

fn analysis_text(title: &str, body: &str) -> String {
    let prefix: String = body.chars().take(BODY_PREFIX_CHARS).collect();
    format!("{} {}", title, prefix)
}

fn score_keywords(text: &str, keywords: &[&str]) -> usize {
    keywords.iter().map(|keyword| text.matches(keyword).count()).sum()
}
