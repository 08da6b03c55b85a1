//! File zone integration tests.

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use s3lite_client::{FileZoneIo, S3FileZone};

    use crate::{cleanup_bucket, s3_client, test_bucket_name, test_config};

    #[test]
    #[ignore = "requires running server"]
    fn test_should_activate_against_live_server() {
        assert!(S3FileZone::activate(&test_config()).is_ok());
    }

    #[test]
    #[ignore = "requires running server"]
    fn test_should_create_zone_on_first_upload() {
        let zone = S3FileZone::new(s3_client());
        let name = test_bucket_name("zone");

        assert!(zone.upload_file(
            &name,
            "boot.cfg",
            Box::new(Cursor::new(b"config".to_vec())),
            Some(6),
            &mut |e| panic!("upload_file: {e}"),
        ));
        assert_eq!(
            zone.get_all_file_names(&name, &mut |e| panic!("get_all_file_names: {e}")),
            ["boot.cfg"]
        );

        let mut out = Vec::new();
        assert!(zone.get_file(&name, "boot.cfg", &mut out, &mut |e| panic!("get_file: {e}")));
        assert_eq!(out, b"config");

        cleanup_bucket(zone.client(), &name);
    }
}
