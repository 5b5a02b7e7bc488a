//! Manual sync integration tests
//!
//! Drives the job through event dispatch the way the job runner does.

#[cfg(test)]
mod tests {
    use crate::common::{AccountFactory, SyncHarness, TransactionFactory};
    use midday_jobs::JobError;
    use midday_jobs::config::SyncConfig;
    use midday_jobs::core::models::ProviderKind;
    use midday_jobs::core::providers::StaticProvider;
    use midday_jobs::jobs::{self, Events, ManualSyncJob, ManualSyncPayload, SyncSummary};
    use midday_jobs::services::{ScheduleSpec, team_tags};
    use midday_jobs::storage::Fixture;
    use serde_json::json;

    #[tokio::test]
    async fn test_large_account_is_written_in_bounded_batches() {
        let account = AccountFactory::create("team_big", ProviderKind::Gocardless);
        let transactions = TransactionFactory::for_account(&account, 1250);
        let provider = StaticProvider::new(ProviderKind::Gocardless)
            .with_transactions(&account.account_id, transactions);
        let h = SyncHarness::new(SyncConfig::default(), vec![account], vec![provider]);

        let payload = json!({ "teamId": "team_big" });
        let output = jobs::trigger(&h.ctx, Events::TRANSACTIONS_MANUAL_SYNC, payload)
            .await
            .unwrap();

        assert_eq!(output["fetched"], 1250);
        assert_eq!(output["batches"], 5);
        assert_eq!(h.store.batch_sizes(), vec![300, 300, 300, 300, 50]);
        assert_eq!(h.store.transaction_count(), 1250);
    }

    #[tokio::test]
    async fn test_multiple_accounts_and_providers() {
        let teller = AccountFactory::create("team_1", ProviderKind::Teller);
        let plaid = AccountFactory::create("team_1", ProviderKind::Plaid);
        let disabled = AccountFactory::disabled("team_1", ProviderKind::Plaid);
        let other_team = AccountFactory::create("team_2", ProviderKind::Teller);

        let teller_provider = StaticProvider::new(ProviderKind::Teller)
            .with_transactions(
                &teller.account_id,
                TransactionFactory::for_account(&teller, 4),
            )
            .with_transactions(
                &other_team.account_id,
                TransactionFactory::for_account(&other_team, 9),
            );
        let plaid_provider = StaticProvider::new(ProviderKind::Plaid)
            .with_transactions(
                &plaid.account_id,
                TransactionFactory::for_account(&plaid, 3),
            )
            .with_transactions(
                &disabled.account_id,
                TransactionFactory::for_account(&disabled, 8),
            );

        let h = SyncHarness::new(
            SyncConfig {
                batch_limit: 2,
                ..Default::default()
            },
            vec![teller, plaid, disabled, other_team],
            vec![teller_provider, plaid_provider],
        );

        let summary = ManualSyncJob::run(&h.ctx, ManualSyncPayload::new("team_1"))
            .await
            .unwrap();

        assert_eq!(
            summary,
            SyncSummary {
                team_id: "team_1".to_string(),
                accounts: 2,
                fetched: 7,
                inserted: 7,
                skipped: 0,
                batches: 4,
            }
        );
        assert_eq!(h.store.transaction_count(), 7);
        assert!(h.store.batch_sizes().iter().all(|&n| n <= 2));
    }

    #[tokio::test]
    async fn test_rerun_skips_existing_transactions() {
        let account = AccountFactory::create("team_1", ProviderKind::Teller);
        let transactions = TransactionFactory::for_account(&account, 10);
        let provider = StaticProvider::new(ProviderKind::Teller)
            .with_transactions(&account.account_id, transactions);
        let h = SyncHarness::new(SyncConfig::default(), vec![account], vec![provider]);
        let payload = ManualSyncPayload::new("team_1");

        let first = ManualSyncJob::run(&h.ctx, payload.clone()).await.unwrap();
        let second = ManualSyncJob::run(&h.ctx, payload).await.unwrap();

        assert_eq!(first.inserted, 10);
        assert_eq!(second.inserted, 0);
        assert_eq!(second.skipped, 10);
        assert_eq!(h.store.transaction_count(), 10);
    }

    #[tokio::test]
    async fn test_schedule_and_revalidation() {
        let h = SyncHarness::new(
            SyncConfig {
                schedule_interval_secs: 900,
                ..Default::default()
            },
            vec![],
            vec![],
        );

        ManualSyncJob::run(&h.ctx, ManualSyncPayload::new("team_7"))
            .await
            .unwrap();

        assert_eq!(
            h.scheduler.get("team_7"),
            Some(ScheduleSpec::Interval { seconds: 900 })
        );
        assert_eq!(h.cache.tags(), team_tags("team_7"));
    }

    #[tokio::test]
    async fn test_storage_failure_mid_account_fails_job() {
        let account = AccountFactory::create("team_1", ProviderKind::Teller);
        let transactions = TransactionFactory::for_account(&account, 10);
        let provider = StaticProvider::new(ProviderKind::Teller)
            .with_transactions(&account.account_id, transactions);
        let h = SyncHarness::new(
            SyncConfig {
                batch_limit: 3,
                ..Default::default()
            },
            vec![account],
            vec![provider],
        );
        h.store.fail_upserts_after(2);

        let err = ManualSyncJob::run(&h.ctx, ManualSyncPayload::new("team_1"))
            .await
            .unwrap_err();

        assert!(matches!(err, JobError::JobFailed(msg) if msg == "Something went wrong"));
        // third batch rejected, fourth never attempted
        assert_eq!(h.store.batch_sizes(), vec![3, 3]);
        assert_eq!(h.store.transaction_count(), 6);
        assert!(h.cache.tags().is_empty());
    }

    #[tokio::test]
    async fn test_account_store_failure_fails_job() {
        let h = SyncHarness::new(SyncConfig::default(), vec![], vec![]);
        h.store.set_unavailable(true);

        let err = ManualSyncJob::run(&h.ctx, ManualSyncPayload::new("team_1"))
            .await
            .unwrap_err();
        assert!(matches!(err, JobError::JobFailed(_)));
    }

    #[tokio::test]
    async fn test_trigger_rejects_unknown_event_and_bad_payload() {
        let h = SyncHarness::new(SyncConfig::default(), vec![], vec![]);

        let payload = json!({ "teamId": "t" });
        let err = jobs::trigger(&h.ctx, "transactions-initial-sync", payload)
            .await
            .unwrap_err();
        assert!(matches!(err, JobError::Validation(_)));

        let payload = json!({ "team": "t" });
        let err = jobs::trigger(&h.ctx, Events::TRANSACTIONS_MANUAL_SYNC, payload)
            .await
            .unwrap_err();
        assert!(matches!(err, JobError::Validation(msg) if msg.contains("invalid payload")));
        assert!(h.scheduler.is_empty());
    }

    #[tokio::test]
    async fn test_demo_fixture_sync() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/manual-sync.json");
        let env = Fixture::from_file(path)
            .await
            .unwrap()
            .into_env(SyncConfig::default())
            .unwrap();

        let summary = ManualSyncJob::run(&env.context, ManualSyncPayload::new("team_demo"))
            .await
            .unwrap();

        // the disabled plaid account is not synced
        assert_eq!(summary.accounts, 2);
        assert_eq!(summary.fetched, 4);
        assert_eq!(env.store.transaction_count(), 4);
        assert!(env.store.transaction("team_demo_txn_201").is_none());
        assert_eq!(env.cache.tags().len(), 6);
        assert!(env.scheduler.get("team_demo").is_some());
    }

    #[test]
    fn test_job_definitions() {
        let definitions = jobs::definitions();
        assert_eq!(definitions.len(), 1);
        assert_eq!(definitions[0].id, "transactions-manual-sync");
        assert_eq!(definitions[0].name, "Transactions - Manual Sync");
        assert_eq!(definitions[0].version, "0.0.1");
        assert_eq!(definitions[0].event, Events::TRANSACTIONS_MANUAL_SYNC);
    }
}
