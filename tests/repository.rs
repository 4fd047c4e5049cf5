use pushkind_jobs::domain::address::NewAddress;
use pushkind_jobs::domain::application::{ApplicationStatus, NewJobApplication};
use pushkind_jobs::domain::job::{JobStatus, NewJob};
use pushkind_jobs::domain::profile::NewProfile;
use pushkind_jobs::domain::types::{
    AddressPart, JobDescription, JobName, JobPrice, Proposal, SkillName, UserEmail, UserId,
    Username,
};
use pushkind_jobs::domain::user::{NewUser, UserRole};
use pushkind_jobs::repository::errors::RepositoryError;
use pushkind_jobs::repository::{
    AddressReader, AddressWriter, ApplicationReader, ApplicationWriter, DieselRepository,
    JobListQuery, JobReader, JobWriter, UserListQuery, UserReader, UserWriter,
};

mod common;

fn add_user(repo: &DieselRepository, email: &str, role: UserRole) -> UserId {
    let id = UserId::new();
    repo.upsert_user(&NewUser::new(id, UserEmail::new(email).unwrap(), role, None))
        .unwrap();
    id
}

fn add_job(repo: &DieselRepository, provider: UserId, name: &str, skills: &[&str]) -> NewJob {
    let job = NewJob::new(
        provider,
        JobName::new(name).unwrap(),
        JobDescription::new("Bring your own tools"),
        JobPrice::new(750.0).unwrap(),
        skills.iter().map(|s| SkillName::new(*s).unwrap()).collect(),
    );
    repo.create_job(&job).unwrap();
    job
}

#[test]
fn test_user_search_count_matches_rows_across_pages() {
    let test_db = common::TestDb::new("test_user_search_count.db");
    let repo = DieselRepository::new(test_db.pool());

    for i in 0..7 {
        add_user(&repo, &format!("ann{i}@example.com"), UserRole::Seeker);
    }
    for i in 0..5 {
        add_user(&repo, &format!("bob{i}@example.com"), UserRole::Provider);
    }
    add_user(&repo, "JOANNE@example.com", UserRole::Seeker);

    let mut seen = Vec::new();
    for page in 1..=3 {
        let (total, users) = repo
            .list_users(UserListQuery::new().search("ANN").paginate(page, 3))
            .unwrap();
        assert_eq!(total, 8);
        seen.extend(users.into_iter().map(|user| user.email.into_inner()));
    }

    assert_eq!(seen.len(), 8);
    assert!(seen.iter().all(|email| email.contains("ann")));

    let (total, users) = repo.list_users(UserListQuery::new()).unwrap();
    assert_eq!(total, 13);
    assert_eq!(users.len(), 13);
}

#[test]
fn test_page_past_the_end_returns_no_rows() {
    let test_db = common::TestDb::new("test_page_past_the_end.db");
    let repo = DieselRepository::new(test_db.pool());

    for i in 0..4 {
        add_user(&repo, &format!("ann{i}@example.com"), UserRole::Seeker);
    }
    let provider = add_user(&repo, "provider@example.com", UserRole::Provider);
    add_job(&repo, provider, "Paint the fence", &[]);

    for page in [usize::MAX, 1844674407370955162] {
        let (total, users) = repo
            .list_users(UserListQuery::new().paginate(page, 10))
            .unwrap();
        assert_eq!(total, 5);
        assert!(users.is_empty());

        let (total, jobs) = repo
            .list_jobs(JobListQuery::new().paginate(page, 10))
            .unwrap();
        assert_eq!(total, 1);
        assert!(jobs.is_empty());
    }
}

#[test]
fn test_user_search_treats_wildcards_literally() {
    let test_db = common::TestDb::new("test_user_search_wildcards.db");
    let repo = DieselRepository::new(test_db.pool());
    add_user(&repo, "ann_lee@example.com", UserRole::Seeker);
    add_user(&repo, "annlee@example.com", UserRole::Seeker);

    let (total, users) = repo
        .list_users(UserListQuery::new().search("ann_"))
        .unwrap();

    assert_eq!(total, 1);
    assert_eq!(users[0].email.as_str(), "ann_lee@example.com");
}

#[test]
fn test_upsert_user_updates_role_and_keeps_confirmation() {
    let test_db = common::TestDb::new("test_upsert_user.db");
    let repo = DieselRepository::new(test_db.pool());
    let id = UserId::new();
    let confirmed = chrono::Utc::now().naive_utc();

    repo.upsert_user(&NewUser::new(
        id,
        UserEmail::new("ann@example.com").unwrap(),
        UserRole::Seeker,
        Some(confirmed),
    ))
    .unwrap();
    let updated = repo
        .upsert_user(&NewUser::new(
            id,
            UserEmail::new("ann@example.com").unwrap(),
            UserRole::Provider,
            None,
        ))
        .unwrap();

    assert_eq!(updated.role, UserRole::Provider);
    assert!(updated.email_confirmed_at.is_some());
    assert_eq!(repo.list_users(UserListQuery::new()).unwrap().0, 1);
}

#[test]
fn test_delete_user_cascades() {
    let test_db = common::TestDb::new("test_delete_user_cascades.db");
    let repo = DieselRepository::new(test_db.pool());

    let provider = add_user(&repo, "provider@example.com", UserRole::Provider);
    let seeker = add_user(&repo, "seeker@example.com", UserRole::Seeker);
    add_job(&repo, provider, "Fix the sink", &["plumbing"]);
    let (_, jobs) = repo.list_jobs(JobListQuery::new()).unwrap();
    let job_id = jobs[0].id;

    let profile = repo
        .save_profile(&NewProfile::new(
            seeker,
            Username::new("seeker").unwrap(),
            Some("Ann".into()),
            None,
        ))
        .unwrap();
    repo.create_address(&NewAddress {
        profile_id: profile.id,
        region: AddressPart::new("NCR").unwrap(),
        province: AddressPart::new("Metro Manila").unwrap(),
        city: AddressPart::new("Quezon City").unwrap(),
        barangay: AddressPart::new("Diliman").unwrap(),
        street: None,
    })
    .unwrap();
    repo.create_application(&NewJobApplication::new(
        job_id,
        seeker,
        Proposal::new("I can do it today").unwrap(),
    ))
    .unwrap();

    repo.delete_user(&seeker).unwrap();
    assert!(repo.get_user_by_id(&seeker).unwrap().is_none());
    assert!(repo.get_profile_by_user_id(&seeker).unwrap().is_none());
    assert!(repo.list_addresses(profile.id).unwrap().is_empty());
    assert!(repo.list_job_applications(job_id).unwrap().is_empty());

    repo.delete_user(&provider).unwrap();
    assert!(repo.get_job_by_id(job_id).unwrap().is_none());
    assert!(matches!(
        repo.delete_user(&provider),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn test_delete_users_ignores_unknown_ids() {
    let test_db = common::TestDb::new("test_delete_users.db");
    let repo = DieselRepository::new(test_db.pool());
    let ann = add_user(&repo, "ann@example.com", UserRole::Seeker);
    let bob = add_user(&repo, "bob@example.com", UserRole::Seeker);
    add_user(&repo, "carl@example.com", UserRole::Seeker);

    let deleted = repo.delete_users(&[ann, bob, UserId::new()]).unwrap();

    assert_eq!(deleted, 2);
    let (total, users) = repo.list_users(UserListQuery::new()).unwrap();
    assert_eq!(total, 1);
    assert_eq!(users[0].email.as_str(), "carl@example.com");
}

#[test]
fn test_jobs_share_skills_and_filter_by_name() {
    let test_db = common::TestDb::new("test_jobs_skills.db");
    let repo = DieselRepository::new(test_db.pool());
    let provider = add_user(&repo, "provider@example.com", UserRole::Provider);
    let other = add_user(&repo, "other@example.com", UserRole::Provider);

    add_job(&repo, provider, "Paint the fence", &["Painting", "carpentry"]);
    add_job(&repo, provider, "Paint a mural", &["painting"]);
    add_job(&repo, other, "Walk the dog", &[]);

    let (total, jobs) = repo
        .list_jobs(JobListQuery::new().search("paint"))
        .unwrap();
    assert_eq!(total, 2);
    assert_eq!(jobs[0].name.as_str(), "Paint a mural");
    let painting = jobs[0].skills[0].id;
    assert_eq!(jobs[1].skills.len(), 2);
    assert!(jobs[1].skills.iter().any(|skill| skill.id == painting));

    let (own_total, own) = repo
        .list_jobs(JobListQuery::new().provider(other))
        .unwrap();
    assert_eq!(own_total, 1);
    assert!(own[0].skills.is_empty());

    let (open_total, _) = repo
        .list_jobs(JobListQuery::new().status(JobStatus::Open).paginate(2, 2))
        .unwrap();
    assert_eq!(open_total, 3);
}

#[test]
fn test_duplicate_application_is_rejected() {
    let test_db = common::TestDb::new("test_duplicate_application.db");
    let repo = DieselRepository::new(test_db.pool());
    let provider = add_user(&repo, "provider@example.com", UserRole::Provider);
    let seeker = add_user(&repo, "seeker@example.com", UserRole::Seeker);
    add_job(&repo, provider, "Fix the sink", &[]);
    let job_id = repo.list_jobs(JobListQuery::new()).unwrap().1[0].id;

    let application = NewJobApplication::new(job_id, seeker, Proposal::new("Hire me").unwrap());
    let created = repo.create_application(&application).unwrap();
    assert_eq!(created.status, ApplicationStatus::Pending);

    assert!(matches!(
        repo.create_application(&application),
        Err(RepositoryError::Duplicate(_))
    ));

    let accepted = repo
        .update_application_status(created.id, ApplicationStatus::Accepted)
        .unwrap();
    assert_eq!(accepted.status, ApplicationStatus::Accepted);
    let found = repo.get_application_for(job_id, &seeker).unwrap().unwrap();
    assert_eq!(found.id, created.id);
    let listed = repo.list_job_applications(job_id).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].1.email.as_str(), "seeker@example.com");
}

#[test]
fn test_username_is_unique() {
    let test_db = common::TestDb::new("test_username_unique.db");
    let repo = DieselRepository::new(test_db.pool());
    let ann = add_user(&repo, "ann@example.com", UserRole::Seeker);
    let bob = add_user(&repo, "bob@example.com", UserRole::Seeker);

    repo.save_profile(&NewProfile::new(ann, Username::new("ann").unwrap(), None, None))
        .unwrap();
    let renamed = repo
        .save_profile(&NewProfile::new(ann, Username::new("annie").unwrap(), None, None))
        .unwrap();
    assert_eq!(renamed.username.as_str(), "annie");

    assert!(matches!(
        repo.save_profile(&NewProfile::new(bob, Username::new("ANNIE").unwrap(), None, None)),
        Err(RepositoryError::Duplicate(_))
    ));
    let found = repo
        .get_profile_by_username(&Username::new("annie").unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(found.user_id, ann);
}
