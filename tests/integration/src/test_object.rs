//! Object integration tests.

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read};

    use s3lite_client::S3ClientError;

    use crate::{cleanup_bucket, create_test_bucket, s3_client};

    #[test]
    #[ignore = "requires running server"]
    fn test_should_put_get_and_delete_object() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "object");
        let data: Vec<u8> = (0..50_000u32).map(|i| (i % 256) as u8).collect();

        assert!(client.put_object_sized(
            &bucket,
            "dir/cat pic.bin",
            Cursor::new(data.clone()),
            data.len() as u64,
            "application/octet-stream",
            &mut |e| panic!("put_object_sized: {e}"),
        ));

        let mut stream = client
            .get_object(&bucket, "dir/cat pic.bin", &mut |e| panic!("get_object: {e}"))
            .expect("object stream");
        let mut downloaded = Vec::new();
        stream.read_to_end(&mut downloaded).unwrap();
        assert_eq!(downloaded, data);

        client.delete_object(&bucket, "dir/cat pic.bin", &mut |e| {
            panic!("delete_object: {e}")
        });
        assert!(
            client
                .get_object_list(&bucket, &mut |e| panic!("get_object_list: {e}"))
                .is_empty()
        );

        cleanup_bucket(&client, &bucket);
    }

    #[test]
    #[ignore = "requires running server"]
    fn test_should_upload_with_content_length() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "sized");

        assert!(client.put_object_sized(
            &bucket,
            "hello.txt",
            Cursor::new(b"hello world".to_vec()),
            11,
            "text/plain",
            &mut |e| panic!("put_object_sized: {e}"),
        ));
        let keys = client.get_object_list(&bucket, &mut |e| panic!("get_object_list: {e}"));
        assert_eq!(keys, ["hello.txt"]);

        cleanup_bucket(&client, &bucket);
    }

    #[test]
    #[ignore = "requires running server"]
    fn test_should_delete_missing_object() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "delete");

        client.delete_object(&bucket, "missing.txt", &mut |e| {
            panic!("delete_object: {e}")
        });

        cleanup_bucket(&client, &bucket);
    }

    #[test]
    #[ignore = "requires running server"]
    fn test_should_report_missing_object() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "missing");

        let mut errors = Vec::new();
        let stream = client.get_object(&bucket, "nope", &mut |e| errors.push(e));

        assert!(stream.is_none());
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], S3ClientError::Transport(_)));

        cleanup_bucket(&client, &bucket);
    }
}
