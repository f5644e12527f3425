use voca_types::{Example, LookupRecord};

struct Sample {
    term: &'static str,
    pronunciation: &'static str,
    part_of_speech: &'static str,
    definition: &'static str,
    simple_explanation: &'static str,
    examples: &'static [(&'static str, &'static str)],
    synonyms: &'static [&'static str],
    antonyms: &'static [&'static str],
    etymology: &'static str,
    memory_aid: &'static str,
}

const SAMPLES: &[Sample] = &[
    Sample {
        term: "extraordinary",
        pronunciation: "/ɪkˈstrɔːrd(ə)n(ə)ri/",
        part_of_speech: "adjective",
        definition: "非常特殊的；非凡的；异常的",
        simple_explanation: "Beyond what is normal or expected; remarkable or exceptional",
        examples: &[
            ("She has an extraordinary talent for music.", "她在音乐方面有着非凡的天赋。"),
            ("The view from the mountain was extraordinary.", "从山上看到的景色非常壮观。"),
        ],
        synonyms: &["remarkable", "exceptional", "outstanding", "amazing"],
        antonyms: &["ordinary", "common", "normal", "typical"],
        etymology: "来自拉丁语 'extraordinarius'，由 'extra'（超出）+ 'ordinarius'（普通的）组成",
        memory_aid: "EXTRA（额外的）+ ORDINARY（普通的）= 超越普通的 = 非凡的",
    },
    Sample {
        term: "magnificent",
        pronunciation: "/mæɡˈnɪfɪs(ə)nt/",
        part_of_speech: "adjective",
        definition: "壮丽的；宏伟的；极好的",
        simple_explanation: "Extremely beautiful, impressive or grand",
        examples: &[
            ("The palace has a magnificent garden.", "这座宫殿有一个壮丽的花园。"),
            ("She gave a magnificent performance.", "她的表演精彩极了。"),
            ("We had a magnificent view of the bay.", "我们可以看到海湾的壮丽景色。"),
        ],
        synonyms: &["splendid", "grand", "superb"],
        antonyms: &["modest", "humble"],
        etymology: "来自拉丁语 'magnificus'，'magnus'（大的）+ 'facere'（做）",
        memory_aid: "MAGNI（大）+ FIC（做）= 做得宏大 = 壮丽的",
    },
    Sample {
        term: "serendipity",
        pronunciation: "/ˌser(ə)nˈdɪpɪti/",
        part_of_speech: "noun",
        definition: "意外发现珍奇事物的能力；偶然发现",
        simple_explanation: "Finding something good without looking for it",
        examples: &[
            ("Meeting her was pure serendipity.", "遇见她纯属机缘巧合。"),
            ("Many discoveries happen by serendipity.", "许多发现都是偶然得来的。"),
        ],
        synonyms: &["chance", "fluke", "luck"],
        antonyms: &["design", "intention"],
        etymology: "Horace Walpole 于 1754 年根据童话 'The Three Princes of Serendip' 创造",
        memory_aid: "Serendip 王子们总是意外发现宝物",
    },
    Sample {
        term: "perseverance",
        pronunciation: "/ˌpɜːsɪˈvɪər(ə)ns/",
        part_of_speech: "noun",
        definition: "坚持不懈；毅力；不屈不挠",
        simple_explanation: "Continuing to try even when something is difficult",
        examples: &[
            ("Success takes perseverance.", "成功需要毅力。"),
            ("Her perseverance finally paid off.", "她的坚持最终得到了回报。"),
            ("He showed great perseverance in his studies.", "他在学习上表现出极大的毅力。"),
        ],
        synonyms: &["persistence", "tenacity", "determination"],
        antonyms: &["laziness", "idleness"],
        etymology: "来自拉丁语 'perseverare'，'per'（始终）+ 'severus'（严格的）",
        memory_aid: "PER（一直）+ SEVERE（严格）= 一直严格要求自己 = 坚持不懈",
    },
    Sample {
        term: "ephemeral",
        pronunciation: "/ɪˈfem(ə)rəl/",
        part_of_speech: "adjective",
        definition: "短暂的；朝生暮死的",
        simple_explanation: "Lasting for a very short time",
        examples: &[
            ("Fame in the internet age is ephemeral.", "网络时代的名气是短暂的。"),
            ("The beauty of cherry blossoms is ephemeral.", "樱花之美转瞬即逝。"),
        ],
        synonyms: &["fleeting", "transient", "momentary"],
        antonyms: &["permanent", "enduring", "lasting"],
        etymology: "来自希腊语 'ephemeros'，'epi'（在…上）+ 'hemera'（一天）",
        memory_aid: "只存在一天（hemera）的东西 = 短暂的",
    },
    Sample {
        term: "ubiquitous",
        pronunciation: "/juːˈbɪkwɪtəs/",
        part_of_speech: "adjective",
        definition: "无处不在的；普遍存在的",
        simple_explanation: "Seeming to be everywhere at the same time",
        examples: &[
            ("Smartphones have become ubiquitous.", "智能手机已经无处不在。"),
            ("Coffee shops are ubiquitous in the city.", "这座城市里咖啡店随处可见。"),
        ],
        synonyms: &["omnipresent", "pervasive", "universal"],
        antonyms: &["rare", "scarce"],
        etymology: "来自拉丁语 'ubique'（到处）",
        memory_aid: "UBI（哪里）+ QUE（都）= 哪里都有 = 无处不在的",
    },
];

/// Built-in record for a term, matched case-insensitively
pub(crate) fn find(term: &str) -> Option<LookupRecord> {
    let term = term.trim();
    SAMPLES
        .iter()
        .find(|s| s.term.eq_ignore_ascii_case(term))
        .map(Sample::to_record)
}

impl Sample {
    fn to_record(&self) -> LookupRecord {
        LookupRecord {
            term: self.term.to_string(),
            pronunciation: self.pronunciation.to_string(),
            part_of_speech: self.part_of_speech.to_string(),
            definition: self.definition.to_string(),
            simple_explanation: self.simple_explanation.to_string(),
            examples: self
                .examples
                .iter()
                .map(|(primary, secondary)| Example {
                    primary_text: primary.to_string(),
                    secondary_text: secondary.to_string(),
                })
                .collect(),
            synonyms: self.synonyms.iter().map(|s| s.to_string()).collect(),
            antonyms: self.antonyms.iter().map(|s| s.to_string()).collect(),
            etymology: self.etymology.to_string(),
            memory_aid: self.memory_aid.to_string(),
        }
    }
}
