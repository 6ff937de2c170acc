#![allow(missing_docs, dead_code)]

/// A short log excerpt spanning several hex-dump rows and a partial last row.
pub const LOG_LINES: &str = "GET /index.html 200\nGET /missing 404\nPOST /api/items 201\n";

/// The same payload as it would arrive from a socket, in uneven pieces.
pub const CHUNKS: [&[u8]; 5] = [
    b"GET /index",
    b".html 200\nGET /mis",
    b"sing 404\n",
    b"POST /api/items",
    b" 201\n",
];
