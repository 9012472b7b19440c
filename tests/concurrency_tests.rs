//! Concurrency and scratch isolation tests for the matching engine.

use std::sync::Arc;
use std::thread;

use chanmatch::{
    Channel, ChannelMatcher, ChannelStore, ChanmatchConfig, ContentItem, InMemoryScratch,
    ScratchTextEngine, StaticCircleResolver, StaticLanguageDirectory, StaticUserDirectory,
    TextQueryAdapter, UserProfile,
};

#[test]
fn concurrent_evaluations_never_observe_each_others_text() {
    let scratch = Arc::new(InMemoryScratch::new());
    let engine = Arc::new(ScratchTextEngine::new(scratch.clone()));

    // Texts and queries are chosen to cross-match: if two evaluations ever
    // shared a scratch key, the negative assertions would trip.
    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                for _ in 0..200 {
                    if worker % 2 == 0 {
                        assert!(engine
                            .matches("alpha AND beta", "alpha beta gamma-free")
                            .expect("matches"));
                        assert!(!engine
                            .matches("gamma", "alpha beta gamma-free")
                            .expect("matches"));
                    } else {
                        assert!(engine
                            .matches("gamma AND delta", "gamma delta alpha-free")
                            .expect("matches"));
                        assert!(!engine
                            .matches("alpha", "gamma delta alpha-free")
                            .expect("matches"));
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker");
    }

    // Every exit path released its staged row.
    assert_eq!(scratch.staged_rows(), 0);
}

fn population_matcher() -> ChannelMatcher {
    let store = Arc::new(chanmatch::store_from_config(&ChanmatchConfig::default()).expect("store"));
    let mut users = StaticUserDirectory::new();
    for uid in 1..=20 {
        users.push(UserProfile::active_person(uid));
        let mut channel = Channel::new(uid, format!("channel-{uid}"));
        channel.publish = true;
        if uid % 3 == 0 {
            channel.include_tags = "space".into();
        }
        if uid % 4 == 0 {
            channel.full_text_search = "rocket -scrub".into();
        }
        store.upsert(&mut channel).expect("upsert");
    }
    ChannelMatcher::new(
        store,
        Arc::new(users),
        Arc::new(StaticCircleResolver::new()),
        Arc::new(StaticLanguageDirectory::new().with_allowed(&["en"])),
        Arc::new(ScratchTextEngine::in_memory()),
    )
}

#[test]
fn concurrent_fanout_is_deterministic() {
    let matcher = Arc::new(population_matcher());
    let content = ContentItem {
        search_text: "rocket launch tonight".into(),
        language: "en".into(),
        tags: vec!["Space".into()],
        ..Default::default()
    };

    let baseline = matcher.matching_subscribers(&content).expect("baseline");
    assert!(!baseline.is_empty());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let matcher = Arc::clone(&matcher);
            let content = content.clone();
            thread::spawn(move || matcher.matching_subscribers(&content).expect("fanout"))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("worker"), baseline);
    }
}

#[test]
fn shared_store_serves_concurrent_existence_checks() {
    let matcher = Arc::new(population_matcher());

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let matcher = Arc::clone(&matcher);
            thread::spawn(move || {
                let content = ContentItem {
                    search_text: format!("post number {i}"),
                    language: "en".into(),
                    ..Default::default()
                };
                matcher.exists_match(&content).expect("exists")
            })
        })
        .collect();

    for handle in handles {
        // Every user has at least one unrestricted-or-tagged channel, and
        // users 1, 2, 5, ... carry no restrictions at all.
        assert!(handle.join().expect("worker"));
    }
}

#[test]
fn channels_saved_after_wiring_are_visible() {
    // ChannelStore is shared by Arc between the matcher and the CRUD path.
    let store: Arc<ChannelStore> =
        Arc::new(chanmatch::store_from_config(&ChanmatchConfig::default()).expect("store"));
    let matcher = ChannelMatcher::new(
        store.clone(),
        Arc::new(StaticUserDirectory::new().with_user(UserProfile::active_person(1))),
        Arc::new(StaticCircleResolver::new()),
        Arc::new(StaticLanguageDirectory::new()),
        Arc::new(ScratchTextEngine::in_memory()),
    );

    let mut channel = Channel::new(1, "added after wiring");
    channel.publish = true;
    store.upsert(&mut channel).expect("upsert");

    let content = ContentItem {
        language: "en".into(),
        ..Default::default()
    };
    assert_eq!(
        matcher.matching_subscribers(&content).expect("fanout"),
        vec![1]
    );
}
