use super::{Hist, Point, LABEL_MAX};
use crate::report::Opts;

fn time_run() -> Opts {
    Opts {
        time_run: true,
        ..Default::default()
    }
}

fn loop1() -> Point {
    let mut point = Point::new();
    point.set_label("loop1");
    point.update_fp_count(10);
    point.update_bytes(500);
    point.update_read_bytes(200);
    point.update_write_bytes(300);
    point.set_src_file_start("a.c");
    point.set_src_file_end("a.c");
    point.set_line_start(10);
    point.set_line_end(20);
    point
}

#[test]
fn test_new() {
    let point = Point::new();
    assert_eq!(point.get_label(), "");
    assert_eq!(point.src_file_start(), "");
    assert_eq!(point.src_file_end(), "");
    assert_eq!(point.line_start(), 0);
    assert_eq!(point.line_end(), 0);
    assert_eq!(point.start(), 0.0);
    assert_eq!(point.end(), 0.0);
    assert_eq!(point.flops(), 0);
    assert_eq!(point.bytes(), 0);
    assert_eq!(point.read_bytes(), 0);
    assert_eq!(point.write_bytes(), 0);
    assert_eq!(point.hist(), &Hist::new());
}

#[test]
fn test_bucket_boundaries() {
    assert_eq!(Hist::bucket(0), 0);
    assert_eq!(Hist::bucket(1), 0);
    assert_eq!(Hist::bucket(2), 1);
    assert_eq!(Hist::bucket(3), 1);
    assert_eq!(Hist::bucket(4), 2);
    assert_eq!(Hist::bucket(8), 3);
    assert_eq!(Hist::bucket(127), 6);
    assert_eq!(Hist::bucket(128), 7);
    assert_eq!(Hist::bucket(100000), 7);
    assert_eq!(Hist::bucket(u64::MAX), 7);
}

#[test]
fn test_update_bytes_bucket() {
    for (bytes, bucket) in [(1, 0), (2, 1), (127, 6), (128, 7), (100000, 7)] {
        let mut point = Point::new();
        point.update_bytes(bytes);
        let mut want = [0; 8];
        want[bucket] = 1;
        assert_eq!(point.hist().buckets(), &want, "{} bytes", bytes);
    }
}

#[test]
fn test_update_bytes_totals() {
    let sizes = [1, 2, 4, 8, 16, 3, 64, 4096, 127, 128];
    let mut point = Point::new();
    for n in sizes {
        point.update_bytes(n);
    }
    assert_eq!(point.bytes(), sizes.iter().sum::<u64>());
    assert_eq!(point.hist().count(), sizes.len() as u64);
    assert_eq!(point.hist().buckets(), &[1, 2, 1, 1, 1, 0, 2, 2]);
    assert_eq!(point.read_bytes(), 0);
    assert_eq!(point.write_bytes(), 0);
}

#[test]
fn test_update_bytes_zero() {
    let mut point = Point::new();
    point.update_bytes(0);
    assert_eq!(point.bytes(), 0);
    assert_eq!(point.hist().buckets(), &[1, 0, 0, 0, 0, 0, 0, 0]);
}

#[test]
fn test_directional_bytes() {
    let mut point = Point::new();
    point.update_read_bytes(8);
    point.update_read_bytes(4);
    point.update_write_bytes(16);
    assert_eq!(point.read_bytes(), 12);
    assert_eq!(point.write_bytes(), 16);
    assert_eq!(point.bytes(), 0);
    assert_eq!(point.hist().count(), 0);
}

#[test]
fn test_update_fp_count() {
    let mut point = Point::new();
    point.update_fp_count(3);
    point.update_fp_count(0);
    point.update_fp_count(4);
    assert_eq!(point.flops(), 7);
}

#[test]
fn test_reset() {
    let mut point = loop1();
    point.set_start(1.0);
    point.set_end(2.0);
    point.update_bytes(8);
    let hist = point.hist().clone();

    point.reset();

    assert_eq!(point.get_label(), "");
    assert_eq!(point.src_file_start(), "");
    assert_eq!(point.src_file_end(), "");
    assert_eq!(point.line_start(), 0);
    assert_eq!(point.line_end(), 0);
    assert_eq!(point.start(), 0.0);
    assert_eq!(point.end(), 0.0);
    assert_eq!(point.flops(), 0);
    assert_eq!(point.bytes(), 0);

    // Kept across activations.
    assert_eq!(point.read_bytes(), 200);
    assert_eq!(point.write_bytes(), 300);
    assert_eq!(point.hist(), &hist);
    assert_eq!(point.hist().count(), 2);
}

#[test]
fn test_label_truncated() {
    let mut point = Point::new();
    let long = "x".repeat(LABEL_MAX + 10);
    point.set_label(&long);
    assert_eq!(point.get_label(), &long[..LABEL_MAX]);

    // A multi-byte char straddling the capacity is dropped whole.
    let long = format!("{}é", "x".repeat(LABEL_MAX - 1));
    point.set_label(&long);
    assert_eq!(point.get_label(), &long[..LABEL_MAX - 1]);

    point.set_label("short");
    assert_eq!(point.get_label(), "short");
}

#[test]
fn test_dump_info() {
    let mut out: Vec<u8> = vec![];
    loop1()
        .dump_info(&mut out, "loop1", 3, &Opts::default())
        .unwrap();
    let want = "\
<point label=\"loop1\">
<flops>10</flops>
<bytes>500</bytes>
<read_bytes>200</read_bytes>
<write_bytes>300</write_bytes>
<src_file_start>a.c</src_file_start>
<src_file_end>a.c</src_file_end>
<line_n_start>10</line_n_start>
<line_n_end>20</line_n_end>
<thread>3</thread>
</point>
";
    assert_eq!(String::from_utf8(out).unwrap(), want);
}

#[test]
fn test_dump_info_display_label() {
    let mut out: Vec<u8> = vec![];
    loop1()
        .dump_info(&mut out, "loop1_call2", 0, &Opts::default())
        .unwrap();
    let out = String::from_utf8(out).unwrap();
    assert!(out.starts_with("<point label=\"loop1_call2\">\n"));
    assert!(!out.contains("<time>"));
}

#[test]
fn test_dump_info_time_run() {
    let mut point = loop1();
    point.set_start(1.0);
    point.set_end(2.5);

    let mut out: Vec<u8> = vec![];
    point.dump_info(&mut out, "loop1", 3, &time_run()).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "<point label=\"loop1\">\n<time>1.500000</time>\n</point>\n",
    );
}

#[test]
fn test_dump_csv() {
    let mut point = loop1();
    for n in [1, 2, 127, 128, 100000] {
        point.update_bytes(n);
    }

    let mut out: Vec<u8> = vec![];
    point.dump_csv(&mut out, "loop1", 3, &Opts::default()).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "loop1,3,10,100758,200,300,a.c,a.c,10,20,{1 1 0 0 0 0 1 3 }\n",
    );
}

#[test]
fn test_dump_csv_time_run() {
    let mut out: Vec<u8> = vec![];
    loop1().dump_csv(&mut out, "loop1", 3, &time_run()).unwrap();
    assert!(out.is_empty());
}

#[test]
fn test_dump_deterministic() {
    let build = || {
        let mut point = Point::new();
        point.set_label("k");
        point.set_src_file_start("k.c");
        point.set_line_start(1);
        for i in 0..100 {
            point.update_bytes(i * 3);
            point.update_read_bytes(i);
            point.update_fp_count(i as i32);
        }
        point.set_src_file_end("k.c");
        point.set_line_end(9);
        point
    };
    let dump = |point: &Point| {
        let mut out: Vec<u8> = vec![];
        point.dump_info(&mut out, "k", 1, &Opts::default()).unwrap();
        point.dump_csv(&mut out, "k", 1, &Opts::default()).unwrap();
        out
    };

    assert_eq!(dump(&build()), dump(&build()));
}

#[test]
fn test_dump_propagates_sink_error() {
    struct Broken;

    impl std::io::Write for Broken {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let point = loop1();
    let err = point
        .dump_info(&mut Broken, "loop1", 0, &Opts::default())
        .unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::BrokenPipe);
    let err = point
        .dump_csv(&mut Broken, "loop1", 0, &Opts::default())
        .unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::BrokenPipe);

    // Nothing is written in timing mode, so nothing can fail.
    point.dump_csv(&mut Broken, "loop1", 0, &time_run()).unwrap();
}

#[test]
fn test_record_snapshot() {
    let record = loop1().record("loop1", 3);
    assert_eq!(record.label, "loop1");
    assert_eq!(record.thread, 3);
    assert_eq!(record.flops, 10);
    assert_eq!(record.bytes, 500);
    assert_eq!(record.read_bytes, 200);
    assert_eq!(record.write_bytes, 300);
    assert_eq!(record.src_file_start, "a.c");
    assert_eq!(record.src_file_end, "a.c");
    assert_eq!(record.line_start, 10);
    assert_eq!(record.line_end, 20);
    assert_eq!(record.hist, [0, 0, 0, 0, 0, 0, 0, 1]);
}
