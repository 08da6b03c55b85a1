//! Bucket integration tests.

#[cfg(test)]
mod tests {
    use crate::{cleanup_bucket, create_test_bucket, s3_client, test_bucket_name};

    #[test]
    #[ignore = "requires running server"]
    fn test_should_create_and_head_bucket() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "create");

        assert!(client.head_bucket(&bucket, &mut |e| panic!("head_bucket: {e}")));

        cleanup_bucket(&client, &bucket);
    }

    #[test]
    #[ignore = "requires running server"]
    fn test_should_report_missing_bucket_as_absent() {
        let client = s3_client();
        let bucket = test_bucket_name("missing");
        assert!(!client.head_bucket(&bucket, &mut |e| panic!("head_bucket: {e}")));
    }

    #[test]
    #[ignore = "requires running server"]
    fn test_should_tolerate_creating_owned_bucket_twice() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "twice");

        assert!(client.put_bucket(&bucket, &mut |e| panic!("put_bucket: {e}")));

        cleanup_bucket(&client, &bucket);
    }

    #[test]
    #[ignore = "requires running server"]
    fn test_should_list_created_bucket() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "list");

        let document = client.get_all_buckets(&mut |e| panic!("get_all_buckets: {e}"));
        assert!(document.contains(&bucket), "should contain {bucket}");

        cleanup_bucket(&client, &bucket);
    }
}
