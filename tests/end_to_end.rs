use folio::storage::{FileStore, KeyValueStore};
use folio::{BuilderConfig, BuilderSession, DraftManager, Step};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn open_store(dir: &std::path::Path) -> Arc<dyn KeyValueStore> {
    Arc::new(FileStore::open(dir).unwrap())
}

#[tokio::test(start_paused = true)]
async fn test_draft_survives_reload() {
    let dir = tempfile::tempdir().unwrap();
    let config = BuilderConfig::default().with_storage_dir(dir.path().to_path_buf());

    {
        let mut session = BuilderSession::mount(open_store(dir.path()), &config);
        let form = session.shared_form();
        session.basic_info.set_name(&form, "Ada Lovelace");
        assert_eq!(session.next(), Step::Projects);

        let draft = session.projects.draft_mut();
        draft.title = "Analytical Engine Simulator".to_string();
        draft.period = "2024".to_string();
        assert!(session.projects.add(&form));

        // nothing is written before the first interval elapses
        tokio::time::sleep(config.autosave_interval / 2).await;
        assert!(DraftManager::new(open_store(dir.path())).list_drafts().is_empty());

        tokio::time::sleep(config.autosave_interval).await;
        session.unmount();
    }

    // fresh process view of the same directory
    let session = BuilderSession::open(open_store(dir.path()), &config);
    let portfolio = session.form().snapshot();
    assert_eq!(portfolio.name, "Ada Lovelace");
    assert_eq!(portfolio.projects.len(), 1);
    assert_eq!(portfolio.projects[0].title, "Analytical Engine Simulator");
    assert_eq!(portfolio.projects[0].period, "2024");

    let drafts = DraftManager::new(open_store(dir.path())).list_drafts();
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].name, "Ada Lovelace");
}

#[test]
fn test_blank_project_title_is_not_added() {
    let dir = tempfile::tempdir().unwrap();
    let config = BuilderConfig::default();
    let mut session = BuilderSession::open(open_store(dir.path()), &config);
    let form = session.shared_form();

    session.projects.draft_mut().description = "no title yet".to_string();
    assert!(!session.projects.add(&form));
    assert!(form.snapshot().projects.is_empty());
    assert_eq!(session.projects.draft().description, "no title yet");
}

#[test]
fn test_gallery_continue_and_delete() {
    let dir = tempfile::tempdir().unwrap();
    let config = BuilderConfig::default();
    let mut session = BuilderSession::open(open_store(dir.path()), &config);
    let form = session.shared_form();

    session.basic_info.set_name(&form, "First");
    let first = session.drafts().save_as(&form.snapshot(), None).unwrap();
    session.basic_info.set_name(&form, "Second");
    session.flush().unwrap();
    assert_eq!(session.drafts().list_drafts().len(), 2);

    assert!(session.continue_draft(&first.id).unwrap());
    assert_eq!(form.snapshot().name, "First");

    assert!(session.drafts().delete_draft(&first.id).unwrap());
    let remaining = session.drafts().list_drafts();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].name, "Second");
}
