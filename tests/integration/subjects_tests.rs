use crate::common::{history_doc, mount_status, mount_xml, subject_doc, test_client, xml};
use catalog_harvest::crawler::extract_course_data;
use catalog_harvest::model::{Subject, TermCounts, UNKNOWN_COURSE_NAME};
use catalog_harvest::FetchError;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer};

#[tokio::test]
async fn test_courses_in_document_order_with_missing_href() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_xml(
        &mock_server,
        "/2021/fall/CS.xml",
        subject_doc(&[
            ("100", Some(format!("{}/2021/fall/CS/100.xml", base_url)), "Intro Computer Science"),
            ("125", None, "Intro to Computer Science"),
            ("225", Some(format!("{}/2021/fall/CS/225.xml", base_url)), "Data Structures"),
        ]),
    )
    .await;

    // The first course answers last; order must still follow the listing
    Mock::given(method("GET"))
        .and(path("/2021/fall/CS/100.xml"))
        .respond_with(
            xml(history_doc(&["Fall 2020", "Spring 2021"])).set_delay(Duration::from_millis(300)),
        )
        .mount(&mock_server)
        .await;
    mount_xml(
        &mock_server,
        "/2021/fall/CS/225.xml",
        history_doc(&["Fall 2019", "Fall 2020", "Summer 2021"]),
    )
    .await;

    let subject = Subject::new("CS", format!("{}/2021/fall/CS.xml", base_url));
    let data = extract_course_data(&test_client(), &subject, 8).await.unwrap();

    assert_eq!(data.subject, "CS");
    assert_eq!(data.len(), 3);

    let numbers: Vec<u32> = data.courses.iter().map(|c| c.number).collect();
    assert_eq!(numbers, vec![100, 125, 225]);

    let first = &data.courses[0];
    assert_eq!(first.subject, "CS");
    assert_eq!(first.name, "Intro Computer Science");
    assert_eq!(first.counts, TermCounts::from([1, 1, 0, 0]));
    assert_eq!(first.all_terms, vec!["Fall 2020", "Spring 2021"]);

    let missing = &data.courses[1];
    assert_eq!(missing.counts, TermCounts::default());
    assert!(missing.all_terms.is_empty());

    let last = &data.courses[2];
    assert_eq!(last.counts, TermCounts::from([2, 0, 1, 0]));
}

#[tokio::test]
async fn test_failed_history_contributes_zero_counts() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_xml(
        &mock_server,
        "/MATH.xml",
        subject_doc(&[
            ("221", Some(format!("{}/MATH/221.xml", base_url)), "Calculus I"),
            ("231", Some(format!("{}/MATH/231.xml", base_url)), "Calculus II"),
        ]),
    )
    .await;
    mount_status(&mock_server, "/MATH/221.xml", 500).await;
    mount_xml(&mock_server, "/MATH/231.xml", history_doc(&["Winter 2021"])).await;

    let subject = Subject::new("MATH", format!("{}/MATH.xml", base_url));
    let data = extract_course_data(&test_client(), &subject, 1).await.unwrap();

    assert_eq!(data.len(), 2);
    assert_eq!(data.courses[0].counts, TermCounts::default());
    assert!(data.courses[0].all_terms.is_empty());
    assert_eq!(data.courses[1].counts, TermCounts::from([0, 0, 0, 1]));
}

#[tokio::test]
async fn test_identity_defaults() {
    let mock_server = MockServer::start().await;

    mount_xml(
        &mock_server,
        "/ECE.xml",
        r#"<ns2:subject><courses>
            <course id="ECE 110">Intro to Electronics</course>
            <course></course>
        </courses></ns2:subject>"#,
    )
    .await;

    let subject = Subject::new("ECE", format!("{}/ECE.xml", mock_server.uri()));
    let data = extract_course_data(&test_client(), &subject, 4).await.unwrap();

    assert_eq!(data.len(), 2);
    assert_eq!(data.courses[0].number, 0);
    assert_eq!(data.courses[0].name, "Intro to Electronics");
    assert_eq!(data.courses[1].number, 0);
    assert_eq!(data.courses[1].name, UNKNOWN_COURSE_NAME);
}

#[tokio::test]
async fn test_empty_course_list() {
    let mock_server = MockServer::start().await;
    mount_xml(&mock_server, "/AAS.xml", subject_doc(&[])).await;

    let subject = Subject::new("AAS", format!("{}/AAS.xml", mock_server.uri()));
    let data = extract_course_data(&test_client(), &subject, 4).await.unwrap();

    assert!(data.is_empty());
}

#[tokio::test]
async fn test_course_list_failure_fails_subject() {
    let mock_server = MockServer::start().await;
    mount_status(&mock_server, "/PHYS.xml", 404).await;

    let subject = Subject::new("PHYS", format!("{}/PHYS.xml", mock_server.uri()));
    let result = extract_course_data(&test_client(), &subject, 4).await;

    assert!(matches!(
        result,
        Err(FetchError::Status { status: 404, .. })
    ));
}

#[tokio::test]
async fn test_self_closing_course_gets_unknown_name() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_xml(
        &mock_server,
        "/2021/fall/CS.xml",
        r#"<?xml version="1.0" encoding="UTF-8"?><ns2:subject xmlns:ns2="http://rest.cis.illinois.edu"><courses><course id="125"/><course id="225">Data Structures</course></courses></ns2:subject>"#,
    )
    .await;

    let subject = Subject::new("CS", format!("{}/2021/fall/CS.xml", base_url));
    let data = extract_course_data(&test_client(), &subject, 4).await.unwrap();

    assert_eq!(data.len(), 2);
    assert_eq!(data.courses[0].number, 125);
    assert_eq!(data.courses[0].name, UNKNOWN_COURSE_NAME);
    assert_eq!(data.courses[1].number, 225);
    assert_eq!(data.courses[1].name, "Data Structures");
}
