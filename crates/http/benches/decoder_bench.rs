use bytes::BytesMut;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tern_http::codec::{ContentCoding, RequestDecoder, ResponseEncoder};
use tern_http::protocol::Response;
use tokio_util::codec::{Decoder, Encoder};

const CURL_REQUEST: &[u8] = b"GET /echo/hello HTTP/1.1\r\nHost: localhost:4221\r\nUser-Agent: curl/7.64.1\r\nAccept: */*\r\nAccept-Encoding: gzip\r\n\r\n";

fn decode_request(c: &mut Criterion) {
    c.bench_function("decode_curl_request", |b| {
        b.iter(|| {
            let mut buf = BytesMut::from(black_box(CURL_REQUEST));
            RequestDecoder::new().decode(&mut buf).unwrap().unwrap()
        });
    });
}

fn encode_response(c: &mut Criterion) {
    let body = "hello ".repeat(200);

    c.bench_function("encode_plain_response", |b| {
        b.iter(|| {
            let mut buf = BytesMut::new();
            ResponseEncoder::new().encode((Response::ok().with_body(body.clone()), None), &mut buf).unwrap();
            buf
        });
    });

    c.bench_function("encode_gzip_response", |b| {
        b.iter(|| {
            let mut buf = BytesMut::new();
            ResponseEncoder::new().encode((Response::ok().with_body(body.clone()), Some(ContentCoding::Gzip)), &mut buf).unwrap();
            buf
        });
    });
}

criterion_group!(benches, decode_request, encode_response);
criterion_main!(benches);
