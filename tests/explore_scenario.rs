//! End-to-end scenarios against a file-backed database

use std::collections::HashSet;
use std::sync::Arc;

use explore::{Database, ExploreService};
use tempfile::TempDir;

fn open_service(dir: &TempDir, page_size: usize) -> ExploreService {
    let db = Database::open(&dir.path().join("explore.db")).unwrap();
    ExploreService::new(Arc::new(db), page_size)
}

fn actor_set(page: &explore::LikerPage) -> HashSet<String> {
    page.likers.iter().map(|l| l.actor_id.clone()).collect()
}

#[test]
fn like_mutual_pass_and_relike() {
    let dir = TempDir::new().unwrap();
    let svc = open_service(&dir, 10);

    assert!(!svc.put_decision("actor1", "user1", true).unwrap(), "first like is one-sided");
    assert!(svc.put_decision("user1", "actor1", true).unwrap(), "reciprocal like is mutual");
    assert!(!svc.put_decision("actor1", "user1", false).unwrap(), "a pass is never mutual");

    svc.put_decision("actor2", "user1", true).unwrap();
    svc.put_decision("actor3", "user1", true).unwrap();
    svc.put_decision("actor1", "user1", true).unwrap();

    assert_eq!(svc.count_liked_you("user1").unwrap(), 3);

    let all = svc.list_liked_you("user1", None).unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.next_token.is_none());
    // actor1 wrote last.
    assert_eq!(all.likers[0].actor_id, "actor1");

    // user1 still likes actor1, so that like is mutual and hidden here.
    let new = svc.list_new_liked_you("user1", None).unwrap();
    let expected: HashSet<String> = ["actor2", "actor3"].iter().map(|s| s.to_string()).collect();
    assert_eq!(actor_set(&new), expected);
}

#[test]
fn passed_actor_drops_out_of_every_listing() {
    let dir = TempDir::new().unwrap();
    let svc = open_service(&dir, 10);

    svc.put_decision("actor1", "user1", true).unwrap();
    svc.put_decision("user1", "actor1", true).unwrap();
    svc.put_decision("actor1", "user1", false).unwrap();
    svc.put_decision("actor2", "user1", true).unwrap();
    svc.put_decision("actor3", "user1", true).unwrap();

    assert_eq!(svc.count_liked_you("user1").unwrap(), 2);

    let expected: HashSet<String> = ["actor2", "actor3"].iter().map(|s| s.to_string()).collect();
    assert_eq!(actor_set(&svc.list_liked_you("user1", None).unwrap()), expected);
    assert_eq!(actor_set(&svc.list_new_liked_you("user1", None).unwrap()), expected);
}

#[test]
fn decisions_survive_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let svc = open_service(&dir, 10);
        svc.put_decision("a", "b", true).unwrap();
    }

    let svc = open_service(&dir, 10);
    assert_eq!(svc.count_liked_you("b").unwrap(), 1);
    assert!(svc.put_decision("b", "a", true).unwrap());
}

#[test]
fn exhaustive_paging_matches_count() {
    let dir = TempDir::new().unwrap();
    let svc = open_service(&dir, 3);

    for i in 0..10 {
        svc.put_decision(&format!("fan{}", i), "star", true).unwrap();
    }
    svc.put_decision("star", "fan4", true).unwrap();

    let mut token: Option<String> = None;
    let mut seen = Vec::new();
    let mut pages = 0;
    loop {
        let page = svc.list_liked_you("star", token.as_deref()).unwrap();
        pages += 1;
        seen.extend(page.likers.iter().map(|l| l.actor_id.clone()));
        match page.next_token {
            Some(next) => token = Some(next.to_string()),
            None => break,
        }
    }

    assert_eq!(pages, 4);
    assert_eq!(seen.len() as u64, svc.count_liked_you("star").unwrap());
    assert_eq!(seen.iter().collect::<HashSet<_>>().len(), seen.len());

    let new = svc.list_new_liked_you("star", None).unwrap();
    assert!(!new.likers.iter().any(|l| l.actor_id == "fan4"));
}
